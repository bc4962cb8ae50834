use mekuri_core as game;
use yew::prelude::*;

const DISCORD_INVITE_URL: &str = "https://mee6.xyz/i/8v8dJnysQb";
const GAME_URL: &str = "https://architects-game.vercel.app/";
const SHARE_INTENT_URL: &str = "https://x.com/intent/tweet";

pub(crate) fn share_text(
    revealed_cards: game::CellCount,
    clicks: u32,
    spent_time: game::SpentTime,
) -> String {
    format!(
        "I just revealed {revealed_cards} Architects from the @Architects_nft collection \
         with {clicks} clicks in less than {time} — can you beat that record?\
         \n\nJoin the $CULT now and try the \"Game of Architects\" here {GAME_URL}",
        time = spent_time.human(),
    )
}

fn open_share_intent(text: &str) {
    let encoded = String::from(js_sys::encode_uri_component(text));
    let url = format!("{SHARE_INTENT_URL}?text={encoded}");
    if let Err(err) = gloo::utils::window().open_with_url_and_target(&url, "_blank") {
        log::error!("Could not open the share intent: {:?}", err);
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ResultProps {
    pub revealed_cards: game::CellCount,
    pub clicks: u32,
    pub spent_time: game::SpentTime,
    pub on_close: Callback<()>,
}

#[function_component(ResultView)]
pub(crate) fn result_view(props: &ResultProps) -> Html {
    let ResultProps {
        revealed_cards,
        clicks,
        spent_time,
        on_close,
    } = props.clone();

    let onshare = Callback::from(move |_: MouseEvent| {
        open_share_intent(&share_text(revealed_cards, clicks, spent_time));
    });
    let onclose = Callback::from(move |_: MouseEvent| on_close.emit(()));

    html! {
        <section class="results">
            <span class="result-title">{"Congratz!"}</span>

            <p class="result-text">
                {"You have revealed "}
                <span class="highlight">{revealed_cards}{" Architects"}</span>
                {" with "}
                <span class="highlight">{clicks}{" clicks"}</span>
                {" and less than "}
                <span class="highlight">{spent_time.human()}</span>
                {" — share your success on X"}
            </p>

            <div class="result-buttons">
                <a href={DISCORD_INVITE_URL} target="_blank">
                    <button type="button" class="btn">{"DISCORD"}</button>
                </a>
                <button type="button" class="btn" onclick={onshare}>{"SHARE"}</button>
                <button type="button" class="btn" onclick={onclose}>{"CLOSE"}</button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_text_folds_in_every_stat() {
        let text = share_text(16, 42, game::SpentTime::from_total_secs(85));

        assert_eq!(
            text,
            "I just revealed 16 Architects from the @Architects_nft collection with 42 clicks \
             in less than 1m 25s — can you beat that record?\n\nJoin the $CULT now and try the \
             \"Game of Architects\" here https://architects-game.vercel.app/"
        );
    }

    #[test]
    fn share_text_drops_a_zero_minute_part() {
        let text = share_text(4, 9, game::SpentTime::from_total_secs(45));

        assert!(text.contains("in less than 45s"));
        assert!(!text.contains("0m"));
    }
}
