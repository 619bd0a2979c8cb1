use crate::board::{BoardView, CellView, LeaderboardView};
use crate::leaderboard::WebLeaderboard;
use crate::utils::js_random_seed;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use oddtile_core as game;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Firestore project holding the leaderboard; scores stay in memory without one
    #[arg(long)]
    pub(crate) project: Option<String>,

    /// Web API key sent with leaderboard requests
    #[arg(long)]
    pub(crate) api_key: Option<String>,

    /// Collection the scores are stored in
    #[arg(long, default_value = "scores")]
    pub(crate) collection: String,
}

#[derive(Debug)]
pub(crate) enum Msg {
    NameInput(String),
    Start,
    Ui(game::UiEvent),
    Tick(game::TimerEpoch),
    RevealDone(game::RunId),
    Leaderboard(
        game::LeaderboardRequest,
        Result<game::LeaderboardSnapshot, game::GatewayError>,
    ),
}

/// Browser side of the session: gloo timers and spawned leaderboard requests, all reporting back as messages.
pub(crate) struct WebHost {
    link: Scope<GameView>,
    gateway: Rc<WebLeaderboard>,
}

impl game::TickSource for WebHost {
    type Handle = Interval;

    fn every_second(&mut self, epoch: game::TimerEpoch) -> Self::Handle {
        let link = self.link.clone();
        Interval::new(1_000, move || link.send_message(Msg::Tick(epoch)))
    }
}

impl game::Host for WebHost {
    type Timeout = Timeout;

    fn schedule_reveal_end(&mut self, run: game::RunId, millis: u32) -> Self::Timeout {
        let link = self.link.clone();
        Timeout::new(millis, move || link.send_message(Msg::RevealDone(run)))
    }

    fn publish_score(&mut self, request: game::LeaderboardRequest, record: game::ScoreRecord) {
        let link = self.link.clone();
        let gateway = Rc::clone(&self.gateway);
        wasm_bindgen_futures::spawn_local(async move {
            let result = game::publish_score(&*gateway, record, game::LEADERBOARD_SIZE).await;
            link.send_message(Msg::Leaderboard(request, result));
        });
    }

    fn fetch_leaderboard(&mut self, request: game::LeaderboardRequest) {
        let link = self.link.clone();
        let gateway = Rc::clone(&self.gateway);
        wasm_bindgen_futures::spawn_local(async move {
            let result = game::fetch_snapshot(&*gateway, game::LEADERBOARD_SIZE).await;
            link.send_message(Msg::Leaderboard(request, result));
        });
    }
}

pub(crate) struct GameView {
    session: game::GameSession<WebHost>,
    board: BoardView,
    name_input: String,
    notice: Option<game::GameError>,
}

impl GameView {
    fn dispatch(&mut self, event: game::UiEvent) {
        match self.session.handle(event, &mut self.board) {
            Ok(()) => self.notice = None,
            Err(err @ game::GameError::EmptyPlayerName) => self.notice = Some(err),
            Err(err) => log::warn!("{}", err),
        }
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let Some(grid) = self.board.grid() else {
            return html! {};
        };
        let size = grid.spec().cell_px;

        html! {
            <table class="grid">
                {
                    for grid.rows().map(|row| html! {
                        <tr>
                            {
                                for row.map(|cell| {
                                    let index = cell.index;
                                    let color = cell.color;
                                    let mark = self.board.mark(&cell);
                                    let callback = ctx
                                        .link()
                                        .callback(|clicked: game::CellIndex| Msg::Ui(game::UiEvent::CellClicked(clicked)));
                                    html! {
                                        <CellView {index} {color} {size} {mark} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_start(&self, ctx: &Context<Self>) -> Html {
        if !self.board.start_visible() {
            return html! {};
        }

        let oninput = ctx.link().callback(|e: InputEvent| {
            Msg::NameInput(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let cb_start = ctx.link().callback(|_: MouseEvent| Msg::Start);

        html! {
            <form class="start" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                <input
                    type="text"
                    placeholder="Your name"
                    value={self.name_input.clone()}
                    {oninput}
                />
                <button type="submit" onclick={cb_start}>{"Start Game"}</button>
                if let Some(notice) = &self.notice {
                    <p class="notice">{notice.to_string()}</p>
                }
            </form>
        }
    }

    fn view_game_over(&self, ctx: &Context<Self>) -> Html {
        let Some(message) = self.board.game_over_message() else {
            return html! {};
        };
        let cb_restart = ctx
            .link()
            .callback(|_: MouseEvent| Msg::Ui(game::UiEvent::RestartClicked));

        html! {
            <section class="game-over">
                <p>{message}</p>
                <button onclick={cb_restart}>{"Restart"}</button>
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("session seed: {}", seed);

        let host = WebHost {
            link: ctx.link().clone(),
            gateway: Rc::new(WebLeaderboard::from_props(props)),
        };
        let mut session = game::GameSession::new(host, seed);
        session.refresh_leaderboard();

        Self {
            session,
            board: BoardView::default(),
            name_input: String::new(),
            notice: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            NameInput(name) => {
                self.name_input = name;
                false
            }
            Start => {
                self.dispatch(game::UiEvent::StartClicked(self.name_input.clone()));
                true
            }
            Ui(event) => {
                log::trace!("ui event: {:?}", event);
                self.dispatch(event);
                true
            }
            Tick(epoch) => {
                self.session.on_timer_tick(epoch, &mut self.board);
                true
            }
            RevealDone(run) => {
                self.session.on_reveal_finished(run, &mut self.board);
                true
            }
            Leaderboard(request, result) => {
                self.session.on_leaderboard(request, result, &mut self.board);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let leaderboard = self
            .board
            .leaderboard_visible()
            .then(|| self.board.leaderboard().cloned())
            .flatten();

        html! {
            <div class="oddtile">
                <nav>
                    <aside class="level">{self.board.level_label()}</aside>
                    <aside class="timer">{self.board.timer_label()}</aside>
                </nav>
                {self.view_start(ctx)}
                {self.view_grid(ctx)}
                {self.view_game_over(ctx)}
                if let Some(snapshot) = leaderboard {
                    <LeaderboardView {snapshot}/>
                }
            </div>
        }
    }
}
