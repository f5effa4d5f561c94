use crate::scheduler::TimerScheduler;
use crate::storage::LocalBestScore;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use pairs_core as game;
use yew::prelude::*;

type WebSession = game::GameSession<game::SystemClock, TimerScheduler, LocalBestScore>;

fn face_classes(face: game::CardFace) -> Classes {
    use game::CardFace::*;
    match face {
        Hidden => classes!("hidden"),
        Revealed => classes!("flipped"),
        Matched => classes!("flipped", "matched"),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Click(game::CardId),
    Fire(game::Scheduled),
    UpdateTime,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: game::Card,
    face: game::CardFace,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        face,
        callback,
    } = props.clone();

    let class = classes!("card", face_classes(face));
    let label = if face.is_face_up() {
        format!("Card with image {}", card.pair_id)
    } else {
        "Hidden card".to_string()
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.id);
        callback.emit(card.id)
    });

    html! {
        <div {class} {onclick} role="button" aria-label={label} aria-pressed={face.is_face_up().to_string()}>
            <div class="back">{"?"}</div>
            <div class="front">
                // images load only once a card has been turned over
                if face.is_face_up() {
                    <img src={card.artwork.url()} alt={format!("Card {}", card.id)}/>
                }
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct ResultsProps {
    summary: game::GameSummary,
    on_restart: Callback<MouseEvent>,
}

#[function_component(ResultsView)]
fn results_component(props: &ResultsProps) -> Html {
    let ResultsProps {
        summary,
        on_restart,
    } = props.clone();

    html! {
        <dialog id="results" open={true}>
            <article>
                <h2>
                    {
                        if summary.is_new_best { "New Best Score!" } else { "Game Complete!" }
                    }
                </h2>
                <p>{summary.verdict.message()}</p>
                <dl>
                    <dt>{"Clicks"}</dt>
                    <dd>{summary.clicks.to_string()}</dd>
                    <dt>{"Time"}</dt>
                    <dd>{format!("{}s", summary.duration_secs)}</dd>
                </dl>
                if let Some(best) = summary.previous_best.filter(|_| !summary.is_new_best) {
                    <p><small>{format!("Your best: {} clicks", best)}</small></p>
                }
                <footer>
                    <button onclick={on_restart}>{"Play Again"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: WebSession,
    prev_time: u32,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let scheduler = TimerScheduler::new(ctx.link().callback(Msg::Fire));
        let session = game::GameSession::new(
            game::GameConfig::default(),
            seed,
            game::SystemClock,
            scheduler,
            LocalBestScore,
        );

        Self {
            session,
            prev_time: 0,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Click(id) => {
                log::debug!("flip card: {}", id);
                self.session.handle_card_click(id).has_update()
            }
            Fire(task) => {
                log::debug!("timer fired: {:?}", task);
                self.session.fire(task).has_update()
            }
            UpdateTime => {
                let time = self.session.elapsed_secs();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            Restart => {
                log::debug!("restart");
                self.prev_time = 0;
                self.session.reset_game().has_update()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let state = self.session.state();
        let clicks = format_for_counter(state.clicks());
        let elapsed_time = format_for_counter(self.session.elapsed_secs());

        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Restart
        });
        let cb_click = ctx.link().callback(Click);

        html! {
            <div class="pairs">
                <nav>
                    <aside title="Clicks">{clicks}</aside>
                    if let Some(best) = self.session.best_score() {
                        <aside title="Best Score">{format_for_counter(best)}</aside>
                    }
                    <aside title="Time">{elapsed_time}</aside>
                    <span><button onclick={cb_restart.clone()}>{"Restart Game"}</button></span>
                </nav>
                <section class="board">
                    {
                        for state.cards().iter().map(|&card| {
                            let face = state.face(card.id);
                            let callback = cb_click.clone();
                            html! {
                                <CardView key={card.id} {card} {face} {callback}/>
                            }
                        })
                    }
                </section>
                if let Some(&summary) = self.session.summary() {
                    <ResultsView {summary} on_restart={cb_restart}/>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_cards_render_face_up() {
        let classes = face_classes(game::CardFace::Matched);
        assert!(classes.contains("flipped"));
        assert!(classes.contains("matched"));
        assert!(!face_classes(game::CardFace::Hidden).contains("flipped"));
    }
}
