use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use mekuri_core as game;
use game::LayoutGenerator;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::result::ResultView;
use crate::settings::Settings;
use crate::torch::{TORCH_TICK_MS, Torch};
use crate::utils::*;

/// Collection numbers with a deployed card face under `nfts/`.
const SUPPORTED_FACES: &[game::FaceId] = &[
    203, 217, 279, 284, 322, 343, 345, 396, 428, 444, 457, 469, 495, 525, 526, 562, 573, 621, 624,
    627, 654, 672, 683, 705, 714, 716, 717, 727, 728, 730, 740, 749, 763, 783, 802, 817, 819, 830,
    834, 836, 851, 856, 869, 875,
];

fn face_asset_url(face: game::FaceId) -> String {
    format!("nfts/{face}_00000.png")
}

fn new_engine(seed: u64, config: game::GameConfig) -> game::MatchEngine {
    let layout = game::RandomLayoutGenerator::new(seed, SUPPORTED_FACES)
        .generate(config)
        .expect("face pool covers every selectable field size");
    game::MatchEngine::new(layout)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(game::Coord2),
    ClockTick,
    PointerMoved(i32, i32),
    TorchTick,
    ToggleResult,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    pos: game::Coord2,
    face: game::FaceId,
    shown: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        pos,
        face,
        shown,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card clicked at {:?}", pos);
        callback.emit(pos);
    });

    html! {
        <td class={classes!("card", shown.then_some("open"))} {onclick}>
            <div class={classes!("cover", shown.then_some("lifted"))}>
                <span class="cover-tag">{"$CULT"}</span>
            </div>
            // shown - prevent from cheating by deleting the cover via dev tools
            {
                shown.then(|| html! {
                    <img class="face" src={face_asset_url(face)} alt={format!("Architect #{face}")}/>
                })
            }
        </td>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub settings: Settings,
    #[prop_or_default]
    pub seed: Option<u64>,
    pub on_reset: Callback<()>,
}

pub(crate) struct GameView {
    engine: game::MatchEngine,
    torch: Option<Torch>,
    pointer: (i32, i32),
    result_open: bool,
    exit_timeout: Option<Timeout>,
    torch_interval: Option<Interval>,
    pointer_listener: Option<EventListener>,
    _clock_interval: Interval,
}

impl GameView {
    fn create_clock(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::ClockTick))
    }

    fn create_torch_interval(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TORCH_TICK_MS, move || link.send_message(Msg::TorchTick))
    }

    fn track_pointer(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::window(), "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() {
                link.send_message(Msg::PointerMoved(event.client_x(), event.client_y()));
            }
        })
    }

    fn torch_overlay(&self) -> Html {
        match &self.torch {
            Some(torch) => {
                let style = torch.overlay_style(self.pointer, self.engine.is_completed());
                html! { <div class="torch" {style}/> }
            }
            None => Html::default(),
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("starting a session with seed {}", seed);

        let hard_mode = props.settings.hard_mode;
        Self {
            engine: new_engine(seed, props.settings.game_config),
            torch: hard_mode.then(|| Torch::new(seed)),
            pointer: (0, 0),
            result_open: true,
            exit_timeout: None,
            torch_interval: hard_mode.then(|| Self::create_torch_interval(ctx)),
            pointer_listener: hard_mode.then(|| Self::track_pointer(ctx)),
            _clock_interval: Self::create_clock(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClicked(coords) => match self.engine.click(coords) {
                Ok(game::ClickOutcome::Completed) => {
                    log::debug!(
                        "completed with {} clicks in {}s",
                        self.engine.click_count(),
                        self.engine.elapsed_secs()
                    );
                    self.pointer_listener = None;
                    if let Some(torch) = self.torch.as_mut() {
                        torch.begin_reveal();
                    }
                    true
                }
                Ok(_) => true,
                Err(err) => {
                    log::warn!("rejected click at {:?}: {}", coords, err);
                    false
                }
            },
            ClockTick => self.engine.tick().has_update(),
            PointerMoved(x, y) => {
                self.pointer = (x, y);
                self.torch.is_some()
            }
            TorchTick => match self.torch.as_mut() {
                Some(torch) => {
                    torch.tick();
                    if torch.is_done() {
                        self.torch_interval = None;
                    }
                    true
                }
                None => false,
            },
            ToggleResult => {
                self.result_open = !self.result_open;
                true
            }
            Restart => {
                if self.exit_timeout.is_some() {
                    return false;
                }
                let on_reset = ctx.props().on_reset.clone();
                self.exit_timeout = Some(Timeout::new(EXIT_ANIMATION_MS, move || on_reset.emit(())));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let side = self.engine.side();
        let completed = self.engine.is_completed();
        let spent_time = self.engine.spent_time();
        let leaving = self.exit_timeout.is_some();

        let cb_restart = ctx.link().callback(|_| Restart);
        let cb_toggle_result = ctx.link().callback(|_| ToggleResult);

        html! {
            <div class={classes!("game", leaving.then_some("leaving"))}>
                { self.torch_overlay() }

                <div class="stats">
                    <span class="stat">
                        {"Time spent: "}<span class="stat-value">{spent_time.clock()}</span>
                    </span>
                    <span class="stat">
                        {"Clicks spent: "}<span class="stat-value">{self.engine.click_count()}</span>
                    </span>
                </div>

                <p class="game-title">
                    {"Reveal the "}<span class="highlight">{"Architect"}</span>
                    {", then try to find the same one, before the "}
                    <span class="highlight">{"cult"}</span>
                    {" has come for you…"}
                </p>

                <table class="field">
                    {
                        for (0..side).map(|y| html! {
                            <tr>
                                {
                                    for (0..side).map(|x| {
                                        let pos = (x, y);
                                        let shown = self.engine.card_at(pos).shows_face();
                                        let face = self.engine.face_at(pos);
                                        let callback = ctx.link().callback(CardClicked);
                                        html! {
                                            <CardView {pos} {face} {shown} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>

                <div class="buttons">
                    <button type="button" class="restart" onclick={cb_restart}>{"RESTART"}</button>
                    {
                        completed.then(|| html! {
                            <button type="button" class="show-result" onclick={cb_toggle_result}>
                                {"RESULT"}
                            </button>
                        })
                    }
                </div>

                {
                    (completed && self.result_open).then(|| html! {
                        <Modal>
                            <ResultView
                                revealed_cards={self.engine.total_cards()}
                                clicks={self.engine.click_count()}
                                {spent_time}
                                on_close={ctx.link().callback(|_| ToggleResult)}
                            />
                        </Modal>
                    })
                }
            </div>
        }
    }
}
