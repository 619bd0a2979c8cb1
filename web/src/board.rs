use oddtile_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMark {
    Plain,
    Highlighted,
    Dimmed,
}

/// What the page currently shows. The session writes it through the render hooks; the component reads it in `view`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoardView {
    grid: Option<game::Grid>,
    level: Option<game::Level>,
    time_left: Option<game::Seconds>,
    revealed: Option<game::CellIndex>,
    game_over: Option<(String, game::Level)>,
    leaderboard: Option<game::LeaderboardSnapshot>,
    start_visible: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            grid: None,
            level: None,
            time_left: None,
            revealed: None,
            game_over: None,
            leaderboard: None,
            start_visible: true,
        }
    }
}

impl BoardView {
    pub(crate) fn grid(&self) -> Option<&game::Grid> {
        self.grid.as_ref()
    }

    pub(crate) fn level_label(&self) -> String {
        self.level
            .map(|level| format!("Level: {level}"))
            .unwrap_or_default()
    }

    pub(crate) fn timer_label(&self) -> String {
        self.time_left
            .map(|seconds| format!("Time: {seconds}"))
            .unwrap_or_default()
    }

    pub(crate) fn mark(&self, cell: &game::Cell) -> CellMark {
        match self.revealed {
            None => CellMark::Plain,
            Some(odd) if odd == cell.index => CellMark::Highlighted,
            Some(_) => CellMark::Dimmed,
        }
    }

    pub(crate) fn game_over_message(&self) -> Option<String> {
        self.game_over
            .as_ref()
            .map(|(name, level)| format!("Oops {name}! You reached Level {level}"))
    }

    pub(crate) fn start_visible(&self) -> bool {
        self.start_visible
    }

    /// Hidden while a grid is on screen.
    pub(crate) fn leaderboard_visible(&self) -> bool {
        self.grid.is_none()
    }

    pub(crate) fn leaderboard(&self) -> Option<&game::LeaderboardSnapshot> {
        self.leaderboard.as_ref()
    }
}

impl game::Surface for BoardView {
    fn render_grid(&mut self, grid: &game::Grid) {
        self.grid = Some(grid.clone());
        self.revealed = None;
        self.game_over = None;
    }

    fn render_level(&mut self, level: game::Level) {
        self.level = Some(level);
    }

    fn render_timer(&mut self, remaining: Option<game::Seconds>) {
        self.time_left = remaining;
    }

    fn render_reveal(&mut self, odd_index: game::CellIndex) {
        self.revealed = Some(odd_index);
    }

    fn render_game_over(&mut self, player_name: &str, level: game::Level) {
        self.grid = None;
        self.revealed = None;
        self.game_over = Some((player_name.to_owned(), level));
    }

    fn render_leaderboard(&mut self, snapshot: &game::LeaderboardSnapshot) {
        self.leaderboard = Some(snapshot.clone());
    }

    fn set_start_control_visible(&mut self, visible: bool) {
        self.start_visible = visible;
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CellProps {
    pub(crate) index: game::CellIndex,
    pub(crate) color: game::Rgb,
    pub(crate) size: game::Pixels,
    #[prop_or(CellMark::Plain)]
    pub(crate) mark: CellMark,
    pub(crate) callback: Callback<game::CellIndex>,
}

#[function_component(CellView)]
pub(crate) fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        color,
        size,
        mark,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        match mark {
            CellMark::Plain => None,
            CellMark::Highlighted => Some("highlighted"),
            CellMark::Dimmed => Some("dimmed"),
        }
    );
    let style = format!("width: {size}px; height: {size}px; background-color: {color};");

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td {class} {style} {onclick}/>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LeaderboardProps {
    pub(crate) snapshot: game::LeaderboardSnapshot,
}

#[function_component(LeaderboardView)]
pub(crate) fn leaderboard_component(props: &LeaderboardProps) -> Html {
    html! {
        <aside class="leaderboard">
            <h3>{"Top Players"}</h3>
            <table>
                <thead>
                    <tr>
                        <th>{"Rank"}</th>
                        <th>{"Name"}</th>
                        <th>{"Max Level"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for props.snapshot.ranked().map(|(rank, record)| html! {
                            <tr>
                                <td>{rank}</td>
                                <td>{record.name.clone()}</td>
                                <td>{record.score}</td>
                            </tr>
                        })
                    }
                </tbody>
            </table>
        </aside>
    }
}
