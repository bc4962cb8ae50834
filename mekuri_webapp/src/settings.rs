use gloo::timers::callback::Timeout;
use mekuri_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::utils::*;

const COLLECTION_URL: &str = "https://x.com/Architects_nft";

pub(crate) const MIN_SIZE: game::Coord = 2;
pub(crate) const MAX_SIZE: game::Coord = 6;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub game_config: game::GameConfig,
    pub hard_mode: bool,
}

impl Settings {
    /// Pulls stored values back into the supported range; local storage is
    /// user-editable.
    pub(crate) fn sanitized(mut self) -> Self {
        let side = self.game_config.side.clamp(MIN_SIZE, MAX_SIZE);
        self.game_config = game::GameConfig::new(side);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_config: game::GameConfig::default(),
            hard_mode: false,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "mekuri:settings";
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    ShrinkField,
    GrowField,
    ToggleHardMode,
    Start,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SettingsProps {
    pub settings: Settings,
    pub on_start: Callback<Settings>,
}

pub(crate) struct SettingsView {
    settings: Settings,
    exit_timeout: Option<Timeout>,
}

impl SettingsView {
    fn set_side(&mut self, side: game::Coord) -> bool {
        let next = game::GameConfig::new(side.clamp(MIN_SIZE, MAX_SIZE));
        if next == self.settings.game_config {
            return false;
        }
        self.settings.game_config = next;
        self.settings.local_save();
        true
    }
}

impl Component for SettingsView {
    type Message = Msg;
    type Properties = SettingsProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            settings: ctx.props().settings,
            exit_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            ShrinkField => self.set_side(self.settings.game_config.side.saturating_sub(2)),
            GrowField => self.set_side(self.settings.game_config.side.saturating_add(2)),
            ToggleHardMode => {
                self.settings.hard_mode = !self.settings.hard_mode;
                self.settings.local_save();
                true
            }
            Start => {
                if self.exit_timeout.is_some() {
                    return false;
                }
                let on_start = ctx.props().on_start.clone();
                let settings = self.settings;
                self.exit_timeout = Some(Timeout::new(EXIT_ANIMATION_MS, move || {
                    on_start.emit(settings)
                }));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let side = self.settings.game_config.side;
        let leaving = self.exit_timeout.is_some();

        html! {
            <form class={classes!("menu", leaving.then_some("leaving"))}>
                <h1 class="menu-title">
                    {"Game of "}<a href={COLLECTION_URL} target="_blank">{"Architects"}</a>
                </h1>

                <span class="menu-subtitle">{"Choose the field size"}</span>

                <div class="size-controls">
                    <button
                        type="button"
                        disabled={side <= MIN_SIZE}
                        onclick={ctx.link().callback(|_| ShrinkField)}
                    >
                        {"-"}
                    </button>
                    <button type="button" class="size-display" disabled=true>
                        {format!("{0}x{0}", side)}
                    </button>
                    <button
                        type="button"
                        disabled={side >= MAX_SIZE}
                        onclick={ctx.link().callback(|_| GrowField)}
                    >
                        {"+"}
                    </button>
                </div>

                <label class="hard-mode">
                    <input
                        type="checkbox"
                        checked={self.settings.hard_mode}
                        onclick={ctx.link().callback(|_| ToggleHardMode)}
                    />
                    {"HARD MODE"}
                </label>

                <button
                    type="button"
                    class="start"
                    onclick={ctx.link().callback(|_| Start)}
                >
                    {"START"}
                </button>
            </form>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_four_by_four_board_without_hard_mode() {
        let settings = Settings::default();
        assert_eq!(settings.game_config.side, 4);
        assert!(!settings.hard_mode);
    }

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "mekuri:settings");
    }

    #[test]
    fn sanitize_clamps_tampered_storage_values() {
        let oversized = Settings {
            game_config: game::GameConfig::new_unchecked(10),
            hard_mode: true,
        };
        assert_eq!(oversized.sanitized().game_config.side, MAX_SIZE);

        let odd = Settings {
            game_config: game::GameConfig::new_unchecked(5),
            hard_mode: false,
        };
        assert_eq!(odd.sanitized().game_config.side, 4);

        let zeroed = Settings {
            game_config: game::GameConfig::new_unchecked(0),
            hard_mode: false,
        };
        assert_eq!(zeroed.sanitized().game_config.side, MIN_SIZE);
    }
}
