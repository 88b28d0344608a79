//! Interactive loop: commands from stdin, board or JSON snapshots to stdout.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use hanging_core::board;
use hanging_core::clock::{Clock, SystemClock};
use hanging_core::shakmaty::Square;
use hanging_core::Session;

use crate::config::{OutputFormat, TrainerConfig};
use crate::error::TrainerError;
use crate::render;
use crate::ticker::{self, Ticker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectMode(usize),
    Toggle(Square),
    Submit,
    Continue,
    Back,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, TrainerError> {
        let word = line.trim().to_ascii_lowercase();
        let command = match word.as_str() {
            "ok" | "submit" => Command::Submit,
            "c" | "continue" | "next" => Command::Continue,
            "back" | "menu" => Command::Back,
            "q" | "quit" | "exit" => Command::Quit,
            _ => {
                if let Ok(index) = word.parse::<usize>() {
                    Command::SelectMode(index)
                } else {
                    board::parse_square(&word)
                        .map(Command::Toggle)
                        .map_err(|_| TrainerError::UnknownCommand(line.trim().to_string()))?
                }
            }
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<C: Clock = SystemClock> {
    session: Session<StdRng, C>,
    config: TrainerConfig,
    ticker: Option<Ticker>,
}

impl App {
    pub fn new(config: TrainerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_clock(rng, SystemClock, config)
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(rng: StdRng, clock: C, config: TrainerConfig) -> Self {
        let mut session = Session::new(rng, clock);
        if let Some(max) = config.max_attempts {
            session = session.with_max_attempts(max);
        }
        Self {
            session,
            config,
            ticker: None,
        }
    }

    pub fn session(&self) -> &Session<StdRng, C> {
        &self.session
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Apply one command. Commands that do not fit the current screen are
    /// ignored.
    pub fn handle(&mut self, command: Command) -> Result<Flow, TrainerError> {
        let at_menu = self.session.puzzle().is_none();
        let result = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::SelectMode(index) if at_menu => self.session.select_mode(index),
            Command::Toggle(square) => {
                self.session.toggle(square);
                Ok(())
            }
            Command::Submit => {
                self.session.submit();
                Ok(())
            }
            Command::Continue => self.session.next_puzzle().map(|_| ()),
            Command::Back => {
                self.session.leave();
                Ok(())
            }
            Command::SelectMode(_) => {
                debug!(?command, "Ignored outside the menu");
                Ok(())
            }
        };
        // A failed regenerate leaves a judged puzzle behind; stop the clock either way.
        self.sync_ticker();
        result?;
        Ok(Flow::Continue)
    }

    /// The ticker runs exactly while a puzzle is being played.
    fn sync_ticker(&mut self) {
        match (self.session.is_playing(), self.ticker.is_some()) {
            (true, false) => self.ticker = Some(Ticker::start(self.config.tick_interval)),
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    /// Current screen in the configured output format.
    pub fn screen(&self) -> Result<String, TrainerError> {
        let text = match self.config.output {
            OutputFormat::Json => serde_json::to_string(&self.session.view())? + "\n",
            OutputFormat::Text => match self.session.view() {
                Some(view) => render::puzzle(&view),
                None => render::menu(),
            },
        };
        Ok(text)
    }

    fn error_text(&self, err: &TrainerError) -> Result<String, TrainerError> {
        let text = match self.config.output {
            OutputFormat::Json => {
                serde_json::to_string(&serde_json::json!({ "error": err.to_string() }))? + "\n"
            }
            OutputFormat::Text => format!("{err}\n"),
        };
        Ok(text)
    }

    pub async fn run(mut self) -> Result<(), TrainerError> {
        let mut lines = BufReader::new(io::stdin()).lines();
        let mut out = io::stdout();

        if let Some(index) = self.config.start_mode {
            if let Err(e) = self.handle(Command::SelectMode(index)) {
                warn!(error = %e, "Could not open start mode");
                write_out(&mut out, &self.error_text(&e)?).await?;
            }
        }
        write_out(&mut out, &self.screen()?).await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match Command::parse(&line).and_then(|command| self.handle(command)) {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => {
                            debug!(error = %e, "Command failed");
                            write_out(&mut out, &self.error_text(&e)?).await?;
                        }
                    }
                    write_out(&mut out, &self.screen()?).await?;
                }
                Some(()) = ticker::next_tick(&mut self.ticker) => {
                    // Text output only redraws on input; JSON consumers get every sample.
                    if self.session.tick().is_some() && self.config.output == OutputFormat::Json {
                        write_out(&mut out, &self.screen()?).await?;
                    }
                }
            }
        }

        self.ticker = None;
        info!("Trainer stopped");
        Ok(())
    }
}

async fn write_out<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<(), TrainerError> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanging_core::clock::ManualClock;
    use hanging_core::{PuzzleState, SessionError};
    use std::time::Duration;

    fn config(output: OutputFormat) -> TrainerConfig {
        TrainerConfig {
            start_mode: None,
            tick_interval: Duration::from_millis(10),
            seed: Some(3),
            output,
            max_attempts: None,
        }
    }

    fn manual_app(output: OutputFormat) -> App<ManualClock> {
        App::with_clock(StdRng::seed_from_u64(3), ManualClock::new(), config(output))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("ok").unwrap(), Command::Submit);
        assert_eq!(Command::parse(" Continue ").unwrap(), Command::Continue);
        assert_eq!(Command::parse("menu").unwrap(), Command::Back);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("3").unwrap(), Command::SelectMode(3));
        assert_eq!(Command::parse("E4").unwrap(), Command::Toggle(Square::E4));
    }

    #[test]
    fn test_parse_rejects_nonsense() {
        assert!(matches!(
            Command::parse("i9"),
            Err(TrainerError::UnknownCommand(s)) if s == "i9"
        ));
    }

    #[tokio::test]
    async fn test_ticker_follows_playing_state() {
        let mut app = manual_app(OutputFormat::Text);
        assert!(!app.is_ticking());

        app.handle(Command::SelectMode(0)).unwrap();
        assert!(app.session().is_playing());
        assert!(app.is_ticking());

        app.handle(Command::Submit).unwrap();
        assert_ne!(app.session().state(), Some(PuzzleState::Playing));
        assert!(!app.is_ticking());

        app.handle(Command::Continue).unwrap();
        assert!(app.is_ticking());

        app.handle(Command::Back).unwrap();
        assert!(app.session().puzzle().is_none());
        assert!(!app.is_ticking());
    }

    #[tokio::test]
    async fn test_mode_select_only_from_menu() {
        let mut app = manual_app(OutputFormat::Text);
        app.handle(Command::SelectMode(1)).unwrap();
        app.handle(Command::SelectMode(2)).unwrap();
        assert_eq!(app.session().mode_index(), Some(1));
    }

    #[tokio::test]
    async fn test_unknown_mode_surfaces_error() {
        let mut app = manual_app(OutputFormat::Text);
        let err = app.handle(Command::SelectMode(42)).unwrap_err();
        assert!(matches!(err, TrainerError::Session(SessionError::UnknownMode(42))));
        assert!(!app.is_ticking());
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = manual_app(OutputFormat::Text);
        assert_eq!(app.handle(Command::Quit).unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn test_screens() {
        let mut app = manual_app(OutputFormat::Json);
        assert_eq!(app.screen().unwrap(), "null\n");

        app.handle(Command::SelectMode(0)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&app.screen().unwrap()).unwrap();
        assert_eq!(json["modeIndex"], 0);
        assert_eq!(json["state"], "PLAYING");

        let mut text_app = manual_app(OutputFormat::Text);
        assert!(text_app.screen().unwrap().contains("Find Hanging Pieces of:"));
        text_app.handle(Command::SelectMode(0)).unwrap();
        assert!(text_app.screen().unwrap().contains("Pick squares and press OK."));
    }
}
