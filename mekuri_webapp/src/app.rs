use clap::Args;
use yew::prelude::*;

use crate::game::GameView;
use crate::settings::{Settings, SettingsView};
use crate::utils::*;

const AUTHOR_URL: &str = "https://x.com/v1z1337";

#[derive(Copy, Clone, Debug, PartialEq)]
enum Stage {
    Menu,
    Playing,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    StartGame(Settings),
    ResetGame,
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct AppView {
    stage: Stage,
    settings: Settings,
}

impl Component for AppView {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let settings: Settings = LocalOrDefault::local_or_default();
        Self {
            stage: Stage::Menu,
            settings: settings.sanitized(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StartGame(settings) => {
                self.settings = settings;
                self.stage = Stage::Playing;
                true
            }
            Msg::ResetGame => {
                self.stage = Stage::Menu;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let stage = match self.stage {
            Stage::Menu => html! {
                <SettingsView
                    settings={self.settings}
                    on_start={ctx.link().callback(Msg::StartGame)}
                />
            },
            Stage::Playing => html! {
                <GameView
                    settings={self.settings}
                    seed={ctx.props().seed}
                    on_reset={ctx.link().callback(|_| Msg::ResetGame)}
                />
            },
        };

        html! {
            <>
                <main class="stage">{stage}</main>
                <footer class="credit">
                    <span>{"made by "}<a href={AUTHOR_URL} target="_blank">{"@v1z"}</a></span>
                </footer>
            </>
        }
    }
}
