use crate::glyphs::glyph_for;
use crate::utils::*;
use flag_rescue_core as game;
use game::{CellView, Coord, FollowUp, Intent, MissionConfig, SessionView};
use gloo::timers::callback::Timeout;
use rand::prelude::*;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Dispatch(Intent),
}

/// Lines of the mission briefing, derived from the rules in play.
fn briefing_lines(config: &MissionConfig) -> [String; 5] {
    [
        format!(
            "• Heavy bomb presence in the field ({}%)",
            (config.effective_bomb_probability() * 100.).round()
        ),
        format!("• Each rescued flag: {} points", config.flag_score),
        "• Consecutive safe reveals earn bonus points".to_string(),
        format!("• Complete mission bonus: {} points", config.completion_bonus),
        "• WARNING: High bomb density!".to_string(),
    ]
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: Coord,
    col: Coord,
    cell: CellView,
    glyph: &'static str,
    #[prop_or_default]
    locked: bool,
    callback: Callback<Intent>,
}

#[function_component(CellButton)]
fn cell_button(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        cell,
        glyph,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        match cell {
            CellView::Hidden => classes!("hidden"),
            CellView::Flag => classes!("open", "flag"),
            CellView::Bomb => classes!("open", "bomb"),
        },
        locked.then_some("locked"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) pressed", row, col);
        callback.emit(Intent::RevealCell((row, col)));
    });

    html! {
        <button {class} {onclick} disabled={locked}>{glyph}</button>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct MissionProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct MissionView {
    game: game::Game,
    rng: SmallRng,
}

impl MissionView {
    fn schedule(ctx: &Context<Self>, follow_up: FollowUp) {
        match follow_up {
            FollowUp::RevealBombs { mission, delay_ms } => {
                log::debug!("bomb reveal for mission {} in {}ms", mission, delay_ms);
                let link = ctx.link().clone();
                // fires once and is never cancelled
                Timeout::new(delay_ms, move || {
                    link.send_message(Msg::Dispatch(Intent::RevealBombs { mission }))
                })
                .forget();
            }
        }
    }

    fn view_briefing(&self, ctx: &Context<Self>) -> Html {
        let cb_accept = ctx.link().callback(|_| Msg::Dispatch(Intent::AcceptMission));
        let [density, flag_score, streak, completion, warning] = briefing_lines(self.game.config());

        html! {
            <section class="briefing">
                <h2>{"⚠️ High-Risk Mission Briefing:"}</h2>
                <p>{density}</p>
                <p>{flag_score}</p>
                <p>{streak}</p>
                <p>{completion}</p>
                <p class="warning">{warning}</p>
                <button class="primary" onclick={cb_accept}>{"Accept Mission"}</button>
            </section>
        }
    }

    fn view_hud(view: &SessionView) -> Html {
        html! {
            <nav class="hud">
                <span>{format!("Score: {}", view.score)}</span>
                <span>{format!("Flags: {}", view.saved_flags)}</span>
                if view.streak_visible() {
                    <span class="streak">{format!("Streak: x{}", view.consecutive_safe)}</span>
                }
            </nav>
        }
    }

    fn view_end(ctx: &Context<Self>, view: &SessionView) -> Html {
        let Some(end) = view.end else {
            return html! {};
        };
        let class = classes!(
            "end",
            match end {
                game::EndView::BombHit { .. } => "lost",
                game::EndView::Won { .. } => "won",
            }
        );
        let cb_new_game = ctx.link().callback(|_| Msg::Dispatch(Intent::StartMission));

        html! {
            <section {class}>
                <h2>{end.headline()}</h2>
                <p>{format!("Final Score: {}", end.final_score())}</p>
                <button class="primary" onclick={cb_new_game}>{"New Mission"}</button>
            </section>
        }
    }

    fn view_board(ctx: &Context<Self>, view: &SessionView) -> Html {
        let mut glyph_rng = SmallRng::seed_from_u64(js_random_seed());
        let locked = view.phase.is_ended();
        let callback = ctx.link().callback(Msg::Dispatch);

        html! {
            <table class={classes!("board", (!locked).then_some("playable"))}>
                {
                    for view.rows.iter().enumerate().map(|(row, cells)| html! {
                        <tr>
                            {
                                for cells.iter().enumerate().map(|(col, &cell)| {
                                    // board dimensions are bounded by `Coord`
                                    let (row, col) = (row as Coord, col as Coord);
                                    let glyph = glyph_for(cell, &mut glyph_rng);
                                    let callback = callback.clone();
                                    html! {
                                        <td>
                                            <CellButton {row} {col} {cell} {glyph} {locked} {callback}/>
                                        </td>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

impl Component for MissionView {
    type Message = Msg;
    type Properties = MissionProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        Self {
            game: game::Game::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Dispatch(intent) = msg;

        let dispatched = self.game.dispatch(intent, &mut self.rng);
        if let Some(follow_up) = dispatched.follow_up {
            Self::schedule(ctx, follow_up);
        }

        dispatched.has_update()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = self.game.view();

        let body = if view.briefing_visible {
            self.view_briefing(ctx)
        } else {
            let cb_restart = ctx.link().callback(|_| Msg::Dispatch(Intent::StartMission));
            let cb_brief = ctx.link().callback(|_| Msg::Dispatch(Intent::ShowBriefing));
            html! {
                <>
                    {Self::view_hud(&view)}
                    {Self::view_end(ctx, &view)}
                    {Self::view_board(ctx, &view)}
                    <footer>
                        <button class="primary" onclick={cb_restart}>{"Restart Mission"}</button>
                        <button class="secondary" onclick={cb_brief}>{"Mission Brief"}</button>
                    </footer>
                </>
            }
        };

        html! {
            <div class="flag-rescue">
                <h1>{"High-Risk Flag Rescue"}</h1>
                {body}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn briefing_reflects_default_rules() {
        let lines = briefing_lines(&MissionConfig::default());

        assert_eq!(lines[0], "• Heavy bomb presence in the field (35%)");
        assert_eq!(lines[1], "• Each rescued flag: 25 points");
        assert_eq!(lines[3], "• Complete mission bonus: 500 points");
    }

    #[test]
    fn briefing_follows_custom_rules() {
        let mut config = MissionConfig::new((4, 4), 0.5);
        config.flag_score = 10;

        let lines = briefing_lines(&config);

        assert_eq!(lines[0], "• Heavy bomb presence in the field (50%)");
        assert_eq!(lines[1], "• Each rescued flag: 10 points");
    }
}
