// --- File: visualize.rs ---
// Interactive terminal view of a running simulation.
//
// Two tasks cooperate: a blocking reader turns key presses into `Command`s and
// sends them over a channel, and the stepping loop waits on either its step
// timer or that channel. Quit and pause interrupt the timer; panning and
// interval changes just redraw.
use crate::config::VisualizerConfig;
use crate::constants::{DEAD_CELL_GLYPH, LIVE_CELL_GLYPH, STATUS_LINES};
use crate::driver::Simulation;
use crate::grid::{ALIVE, Grid, Offset};
use crate::kernel::Kernel;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pan { drow: i64, dcol: i64 },
    LongerInterval,
    ShorterInterval,
    TogglePause,
    Step,
    Quit,
}

impl Command {
    /// Commands that cut the current step wait short.
    pub fn interrupts_wait(self) -> bool {
        matches!(self, Command::TogglePause | Command::Quit)
    }
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Up => Command::Pan { drow: -1, dcol: 0 },
        KeyCode::Down => Command::Pan { drow: 1, dcol: 0 },
        KeyCode::Left => Command::Pan { drow: 0, dcol: -1 },
        KeyCode::Right => Command::Pan { drow: 0, dcol: 1 },
        KeyCode::Char('+') | KeyCode::Char('=') => Command::LongerInterval,
        KeyCode::Char('-') | KeyCode::Char('_') => Command::ShorterInterval,
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Char('j') => Command::Step,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        _ => return None,
    };
    Some(command)
}

// --- World state ---

/// Everything the view loop owns: the simulation plus view and pacing state.
pub struct World<'k, K: Kernel + ?Sized> {
    sim: Simulation<'k, K>,
    config: VisualizerConfig,
    origin: Offset,
    interval: Duration,
    paused: bool,
    step_once: bool,
    quit: bool,
}

impl<'k, K: Kernel + ?Sized> World<'k, K> {
    pub fn new(kernel: &'k K, grid: Grid, config: VisualizerConfig) -> Self {
        let interval = config.clamp_interval(config.step_interval);
        Self {
            sim: Simulation::new(kernel, grid),
            config,
            origin: Offset::ZERO,
            interval,
            paused: false,
            step_once: false,
            quit: false,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Pan { drow, dcol } => self.origin += Offset::new(drow, dcol),
            Command::LongerInterval => {
                self.interval = self
                    .config
                    .clamp_interval(self.interval + self.config.step_interval_adjust);
            }
            Command::ShorterInterval => {
                self.interval = self
                    .config
                    .clamp_interval(self.interval.saturating_sub(self.config.step_interval_adjust));
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                self.step_once = false;
            }
            Command::Step => {
                if self.paused {
                    self.step_once = true;
                }
            }
            Command::Quit => self.quit = true,
        }
    }

    /// Advances one generation. Returns false once the pattern stops changing.
    pub fn evolve(&mut self) -> bool {
        self.sim.step()
    }

    pub fn grid(&self) -> &Grid {
        self.sim.grid()
    }

    pub fn generation(&self) -> u64 {
        self.sim.generation()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn origin(&self) -> Offset {
        self.origin
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_stabilized(&self) -> bool {
        !self.sim.changed()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn take_step_request(&mut self) -> bool {
        std::mem::take(&mut self.step_once)
    }

    /// Lays the visible part of the world out as terminal lines: the cell
    /// area followed by the status lines.
    pub fn render_lines(&self, cols: u16, rows: u16) -> Vec<String> {
        let display_height = rows.saturating_sub(STATUS_LINES) as usize;
        let display_width = (cols / 2) as usize;
        let max_len = (cols as usize).saturating_sub(1);

        let mut cells = vec![vec![false; display_width]; display_height];
        let position = self.sim.position();
        let ul = Offset::new(
            position.row - self.origin.row + self.config.view_offset,
            position.col - self.origin.col + self.config.view_offset,
        );
        let grid = self.sim.grid();
        for (r, row) in grid.rows().enumerate() {
            let display_r = r as i64 + ul.row;
            if display_r < 0 || display_r >= display_height as i64 {
                continue;
            }
            for (c, &cell) in row.iter().enumerate() {
                let display_c = c as i64 + ul.col;
                if cell == ALIVE && display_c >= 0 && display_c < display_width as i64 {
                    cells[display_r as usize][display_c as usize] = true;
                }
            }
        }

        let mut lines: Vec<String> = cells
            .iter()
            .map(|row| {
                let line: String = row
                    .iter()
                    .map(|&alive| if alive { LIVE_CELL_GLYPH } else { DEAD_CELL_GLYPH })
                    .collect();
                clip(line, max_len)
            })
            .collect();

        let mut status = format!("upper left corner: ({}, {})", position.row, position.col);
        if self.paused {
            status.push_str(" [PAUSED]");
        }
        lines.push(clip(status, max_len));
        lines.push(clip(
            format!(
                "view origin: ({}, {}), use arrow keys to move, 'q' to quit, 'space' to pause, 'j' to step.",
                self.origin.row, self.origin.col
            ),
            max_len,
        ));
        lines.push(clip(
            if self.is_stabilized() {
                format!("Stabilized at Generation {}.", self.generation())
            } else {
                format!(
                    "Generation {}, interval: {:.2}s (+/- to change)",
                    self.generation(),
                    self.interval.as_secs_f64()
                )
            },
            max_len,
        ));
        lines
    }
}

fn clip(mut line: String, max_len: usize) -> String {
    if line.len() > max_len {
        // glyphs and status text are ASCII
        line.truncate(max_len);
    }
    line
}

// --- Terminal plumbing ---

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn draw<K: Kernel + ?Sized>(out: &mut impl Write, world: &World<'_, K>) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    for (i, line) in world.render_lines(cols, rows).iter().enumerate() {
        queue!(out, cursor::MoveTo(0, i as u16), style::Print(line))?;
    }
    out.flush()
}

/// Reads key events until the receiving side goes away or quit is pressed.
fn read_input(tx: mpsc::Sender<Command>) -> io::Result<()> {
    while !tx.is_closed() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if let Some(command) = command_for_key(key) {
                if tx.blocking_send(command).is_err() || command == Command::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

enum Wake {
    Elapsed,
    Interrupted,
    Closed,
}

/// Waits `duration`, applying commands as they arrive.
async fn wait_step<K: Kernel + ?Sized>(
    out: &mut impl Write,
    world: &mut World<'_, K>,
    rx: &mut mpsc::Receiver<Command>,
    duration: Duration,
) -> io::Result<Wake> {
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => return Ok(Wake::Elapsed),
            command = rx.recv() => {
                let Some(command) = command else {
                    return Ok(Wake::Closed);
                };
                world.apply(command);
                draw(out, world)?;
                if command.interrupts_wait() {
                    return Ok(Wake::Interrupted);
                }
            }
        }
    }
}

async fn event_loop<K: Kernel + ?Sized>(
    world: &mut World<'_, K>,
    rx: &mut mpsc::Receiver<Command>,
    iter_limit: usize,
) -> io::Result<()> {
    let mut out = io::stdout();
    draw(&mut out, world)?;

    let mut steps = 0usize;
    while steps < iter_limit && !world.should_quit() {
        if world.is_paused() && !world.take_step_request() {
            match rx.recv().await {
                Some(command) => {
                    world.apply(command);
                    draw(&mut out, world)?;
                }
                None => break,
            }
            continue;
        } else if !world.is_paused() {
            let interval = world.interval();
            match wait_step(&mut out, world, rx, interval).await? {
                Wake::Elapsed => {}
                Wake::Interrupted => continue,
                Wake::Closed => break,
            }
        }

        steps += 1;
        let changed = world.evolve();
        draw(&mut out, world)?;
        if !changed {
            let hold = world.config.stabilized_hold;
            let deadline = tokio::time::Instant::now() + hold;
            // hold the final frame until it times out or the user quits
            while !world.should_quit() {
                let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
                match wait_step(&mut out, world, rx, remaining).await? {
                    Wake::Interrupted => continue,
                    Wake::Elapsed | Wake::Closed => break,
                }
            }
            break;
        }
    }
    Ok(())
}

/// Runs the interactive view for up to `iter_limit` generations.
pub fn run<K: Kernel + ?Sized>(
    kernel: &K,
    grid: Grid,
    iter_limit: usize,
    config: VisualizerConfig,
) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut world = World::new(kernel, grid, config);

    let generation = runtime.block_on(async {
        let guard = TerminalGuard::enter()?;
        let (tx, mut rx) = mpsc::channel(64);
        let input = tokio::task::spawn_blocking(move || read_input(tx));

        let result = event_loop(&mut world, &mut rx, iter_limit).await;
        drop(rx);
        drop(guard);

        match input.await {
            Ok(Err(e)) => log::warn!("Input reader failed: {}", e),
            Err(e) => log::warn!("Input task panicked: {}", e),
            Ok(Ok(())) => {}
        }
        result.map(|_| world.generation())
    })?;

    log::info!("Visualizer stopped at generation {}", generation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Strategy;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn blinker() -> Grid {
        Grid::from_rows(&[[1u8, 1, 1]]).unwrap()
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for_key(key(KeyCode::Up)), Some(Command::Pan { drow: -1, dcol: 0 }));
        assert_eq!(command_for_key(key(KeyCode::Right)), Some(Command::Pan { drow: 0, dcol: 1 }));
        assert_eq!(command_for_key(key(KeyCode::Char('='))), Some(Command::LongerInterval));
        assert_eq!(command_for_key(key(KeyCode::Char('_'))), Some(Command::ShorterInterval));
        assert_eq!(command_for_key(key(KeyCode::Char(' '))), Some(Command::TogglePause));
        assert_eq!(command_for_key(key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(command_for_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn interval_stays_in_bounds() {
        let kernel = Strategy::Reference;
        let mut world = World::new(&kernel, blinker(), VisualizerConfig::default());
        for _ in 0..50 {
            world.apply(Command::LongerInterval);
        }
        assert_eq!(world.interval(), Duration::from_secs_f64(2.0));
        for _ in 0..50 {
            world.apply(Command::ShorterInterval);
        }
        assert_eq!(world.interval(), Duration::from_secs_f64(0.1));
    }

    #[test]
    fn step_only_queues_while_paused() {
        let kernel = Strategy::Reference;
        let mut world = World::new(&kernel, blinker(), VisualizerConfig::default());
        world.apply(Command::Step);
        assert!(!world.take_step_request());

        world.apply(Command::TogglePause);
        assert!(world.is_paused());
        world.apply(Command::Step);
        assert!(world.take_step_request());
        assert!(!world.take_step_request());
    }

    #[test]
    fn pan_moves_view_origin() {
        let kernel = Strategy::Optimized;
        let mut world = World::new(&kernel, blinker(), VisualizerConfig::default());
        world.apply(Command::Pan { drow: 1, dcol: 0 });
        world.apply(Command::Pan { drow: 0, dcol: -2 });
        assert_eq!(world.origin(), Offset::new(1, -2));
    }

    #[test]
    fn render_places_cells_at_world_position() {
        let kernel = Strategy::Optimized;
        let mut world = World::new(&kernel, blinker(), VisualizerConfig::default());
        let lines = world.render_lines(40, 13);
        assert_eq!(lines.len(), 13);
        assert_eq!(&lines[3][6..12], "[][][]");
        assert!(lines[10].starts_with("upper left corner: (0, 0)"));

        // vertical phase sits one row up and one column right
        assert!(world.evolve());
        let lines = world.render_lines(40, 13);
        for row in 2..=4 {
            assert_eq!(&lines[row][8..10], "[]");
        }
        assert!(lines[12].starts_with("Generation 1"));
    }

    #[test]
    fn render_clips_to_terminal() {
        let kernel = Strategy::Optimized;
        let mut world = World::new(&kernel, blinker(), VisualizerConfig::default());
        world.apply(Command::Pan { drow: 10, dcol: 10 });
        let lines = world.render_lines(10, 4);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() <= 9));
        assert!(!lines[0].contains('['));
    }

    #[test]
    fn stabilized_status_is_reported() {
        let kernel = Strategy::Optimized;
        let block = Grid::from_rows(&[[1u8, 1], [1, 1]]).unwrap();
        let mut world = World::new(&kernel, block, VisualizerConfig::default());
        assert!(!world.is_stabilized());
        assert!(!world.evolve());
        assert!(world.is_stabilized());
        let lines = world.render_lines(80, 10);
        assert_eq!(lines.last().map(String::as_str), Some("Stabilized at Generation 1."));
    }
}
