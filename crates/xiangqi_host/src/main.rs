//! Headless host for the rule engine.
//!
//! Reads one command per line on stdin and answers on stdout; logs go to
//! stderr. Moves in ICCS notation (`h2e2`) come from the local player,
//! `peer {...}` lines carry a JSON [`WireMessage`] from the other instance.
//! Every outbound message is printed as `send {...}` for the transport to
//! pick up.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use xiangqi_core::{
    BoardSnapshot, Color, ConfigError, Game, GameConfig, GameObserver, Move, MoveEvent, MoveRecord,
    Outcome, WireMessage, legal_moves, move_to_iccs, parse_iccs_move,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostConfig {
    game: GameConfig,
    logging: LoggingConfig,
    /// Colour played at this end of a networked game. Unset means both
    /// sides are played locally.
    local_side: Option<Color>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LoggingConfig {
    filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl HostConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: HostConfig = toml::from_str(&content)?;
        config.game.validate()?;
        Ok(config)
    }
}

/// Prints session events for whoever is reading stdout.
struct TextView {
    config: GameConfig,
}

impl GameObserver for TextView {
    fn on_move(&mut self, event: &MoveEvent) {
        let mv = Move::new(event.record.from, event.record.to);
        let mut out = io::stdout();
        writeln!(
            out,
            "moved {} {} status {:?}",
            event.mover,
            move_to_iccs(mv),
            event.status
        )
        .ok();
        if let Some(o) = event.outcome {
            print_outcome(&mut out, &o, &self.config);
        }
    }

    fn on_regret(&mut self, side: Color, record: &MoveRecord, _snapshot: &BoardSnapshot) {
        let mv = Move::new(record.from, record.to);
        writeln!(io::stdout(), "regret {side} {}", move_to_iccs(mv)).ok();
    }

    fn on_reset(&mut self, _snapshot: &BoardSnapshot) {
        writeln!(io::stdout(), "ready red to move").ok();
    }

    fn on_game_over(&mut self, outcome: &Outcome) {
        print_outcome(&mut io::stdout(), outcome, &self.config);
    }
}

fn print_outcome(out: &mut impl Write, outcome: &Outcome, config: &GameConfig) {
    match outcome.winner {
        Some(w) => writeln!(
            out,
            "gameover winner {w} ({}) reason {:?}",
            config.player_name(w),
            outcome.reason
        ),
        None => writeln!(out, "gameover draw reason {:?}", outcome.reason),
    }
    .ok();
}

fn parse_color(txt: &str) -> Option<Color> {
    match txt.to_ascii_lowercase().as_str() {
        "red" | "r" | "w" => Some(Color::Red),
        "black" | "b" => Some(Color::Black),
        _ => None,
    }
}

fn send(out: &mut impl Write, msg: &WireMessage) {
    match serde_json::to_string(msg) {
        Ok(json) => {
            writeln!(out, "send {json}").ok();
        }
        Err(e) => warn!(error = %e, "could not encode outbound message"),
    }
}

struct Host {
    game: Game,
    local_side: Option<Color>,
}

impl Host {
    /// The colour the peer plays. In a local-only session this is whoever
    /// moved last.
    fn peer_side(&self) -> Color {
        match self.local_side {
            Some(side) => side.other(),
            None => self.game.side_to_move().other(),
        }
    }

    fn local_move(&mut self, out: &mut impl Write, txt: &str) {
        let Some(mv) = parse_iccs_move(txt) else {
            writeln!(out, "error bad move syntax '{txt}'").ok();
            return;
        };
        if let Some(side) = self.local_side
            && self.game.side_to_move() != side
        {
            writeln!(out, "error not your turn").ok();
            return;
        }
        match self.game.attempt_move(mv.from, mv.to) {
            Ok(event) => {
                if self.local_side.is_some() {
                    send(
                        out,
                        &WireMessage::Move {
                            from: event.record.from,
                            to: event.record.to,
                        },
                    );
                }
            }
            Err(e) => {
                writeln!(out, "error {e}").ok();
            }
        }
    }

    fn peer_message(&mut self, out: &mut impl Write, json: &str) {
        let msg: WireMessage = match serde_json::from_str(json) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "undecodable peer message");
                writeln!(out, "error bad peer message").ok();
                return;
            }
        };
        debug!(?msg, "peer message");
        let peer = self.peer_side();
        match msg {
            WireMessage::Move { from, to } => {
                if self.local_side.is_some() && self.game.side_to_move() != peer {
                    warn!(%from, %to, "peer moved out of turn");
                    writeln!(out, "error peer moved out of turn").ok();
                    return;
                }
                if let Err(e) = self.game.attempt_move(from, to) {
                    writeln!(out, "error peer move refused: {e}").ok();
                }
            }
            WireMessage::RegretRequest => {
                if let Err(e) = self.game.try_regret(peer) {
                    writeln!(out, "error peer regret refused: {e}").ok();
                }
            }
            WireMessage::Surrender => {
                self.game.resign(peer);
            }
            WireMessage::DrawOffer => {
                writeln!(out, "draw offered by {peer}").ok();
            }
            WireMessage::DrawAccepted => {
                self.game.agree_draw();
            }
            WireMessage::DrawRejected => {
                writeln!(out, "draw rejected by {peer}").ok();
            }
            WireMessage::RestartRequest => {
                writeln!(out, "restart requested by {peer}").ok();
            }
            WireMessage::RestartAccepted => {
                self.game.initialize();
            }
            WireMessage::RestartRejected => {
                writeln!(out, "restart rejected by {peer}").ok();
            }
            WireMessage::Disconnect => {
                info!("peer disconnected");
                writeln!(out, "peer disconnected").ok();
            }
        }
    }

    /// Returns false when the session should end.
    fn command(&mut self, out: &mut impl Write, line: &str) -> bool {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            return true;
        };

        match cmd {
            "new" => self.game.initialize(),
            "move" => match parts.get(1) {
                Some(txt) => self.local_move(out, txt),
                None => {
                    writeln!(out, "error usage: move <iccs>").ok();
                }
            },
            "peer" => {
                let json = line.trim_start()["peer".len()..].trim();
                self.peer_message(out, json);
            }
            "regret" => {
                let side = parts
                    .get(1)
                    .and_then(|s| parse_color(s))
                    .or(self.local_side)
                    .unwrap_or(self.game.side_to_move().other());
                match self.game.try_regret(side) {
                    Ok(_) => {
                        if self.local_side.is_some() {
                            send(out, &WireMessage::RegretRequest);
                        }
                    }
                    Err(e) => {
                        writeln!(out, "error {e}").ok();
                    }
                }
            }
            "status" => {
                let side = self.game.side_to_move();
                writeln!(
                    out,
                    "status {:?} to_move {side} regrets red {} black {}",
                    self.game.status(),
                    self.game.regret_remaining(Color::Red),
                    self.game.regret_remaining(Color::Black)
                )
                .ok();
                if let Some(o) = self.game.outcome() {
                    print_outcome(out, &o, self.game.config());
                }
            }
            "fen" => {
                writeln!(out, "fen {}", self.game.board().to_fen()).ok();
            }
            "moves" => {
                let list: Vec<String> = legal_moves(self.game.board())
                    .into_iter()
                    .map(move_to_iccs)
                    .collect();
                writeln!(out, "moves {}", list.join(" ")).ok();
            }
            "resign" => {
                let side = parts
                    .get(1)
                    .and_then(|s| parse_color(s))
                    .or(self.local_side)
                    .unwrap_or(self.game.side_to_move());
                if self.game.resign(side).is_some() && self.local_side.is_some() {
                    send(out, &WireMessage::Surrender);
                }
            }
            "draw" => {
                if self.local_side.is_some() {
                    send(out, &WireMessage::DrawOffer);
                } else {
                    self.game.agree_draw();
                }
            }
            "quit" => {
                if self.local_side.is_some() {
                    send(out, &WireMessage::Disconnect);
                }
                return false;
            }
            other => match parse_iccs_move(other) {
                Some(_) => self.local_move(out, other),
                None => {
                    writeln!(out, "error unknown command '{other}'").ok();
                }
            },
        }
        true
    }
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Host config file (`[game]`, `[logging]`, `local_side`).
    config: Option<PathBuf>,
    /// Standalone game config; replaces the `[game]` table when given.
    game: Option<PathBuf>,
    print_game_config: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = args.next().map(PathBuf::from),
            "--game" => parsed.game = args.next().map(PathBuf::from),
            "--print-game-config" => parsed.print_game_config = true,
            other => {
                if let Some(p) = other.strip_prefix("--config=") {
                    parsed.config = Some(PathBuf::from(p));
                } else if let Some(p) = other.strip_prefix("--game=") {
                    parsed.game = Some(PathBuf::from(p));
                } else {
                    eprintln!("xiangqi_host: ignoring unknown argument '{other}'");
                }
            }
        }
    }
    parsed
}

fn resolve_config(args: &Args) -> Result<HostConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    if let Some(path) = &args.game {
        config.game = GameConfig::load_or_default(path)?;
    }
    Ok(config)
}

fn main() {
    let args = parse_args(std::env::args().skip(1));
    if args.print_game_config {
        match GameConfig::default_toml() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("xiangqi_host: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match resolve_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("xiangqi_host: {e}");
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(
        red = config.game.player_name(Color::Red),
        black = config.game.player_name(Color::Black),
        max_regret = config.game.max_regret,
        local_side = ?config.local_side,
        "starting host"
    );

    let view = TextView {
        config: config.game.clone(),
    };
    let mut game = Game::new(config.game);
    game.add_observer(Box::new(view));
    let mut host = Host {
        game,
        local_side: config.local_side,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let keep_going = host.command(&mut stdout, &line);
        stdout.flush().ok();
        if !keep_going {
            break;
        }
    }
}
