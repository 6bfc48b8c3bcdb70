//! Hot-seat driver: one terminal, everyone takes turns at the keyboard.

use desperados_core::{
    Command, GameConfig, GameId, GameManager, GameView, Outcome, ResponseKind, SessionError,
};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use uuid::Uuid;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut config = GameConfig::default();
    let mut names: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                config.seed = args.next().and_then(|s| s.parse().ok());
            }
            "--no-events" => config.events_enabled = false,
            name => names.push(name.to_string()),
        }
    }

    let manager = GameManager::new();
    let game = match manager.create_game(config) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("could not open a table: {err}");
            return;
        }
    };

    let mut seats = Seats::default();
    for name in names {
        join(&manager, game, &mut seats, &name);
    }

    println!("Desperados - type 'help' for commands");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, rest)) = words.split_first() else {
            continue;
        };
        match head {
            "quit" | "exit" => break,
            "help" | "?" => help(),
            "join" => match rest.first() {
                Some(name) => join(&manager, game, &mut seats, name),
                None => println!("join <name>"),
            },
            "start" => run(&manager, game, &seats, None, Command::Start),
            "reset" => run(&manager, game, &seats, None, Command::Reset),
            "state" | "board" => show_board(&manager, game),
            "hand" => show_hand(&manager, game, &seats),
            "end" => run_as_current(&manager, game, &seats, Command::EndTurn),
            "play" => {
                let Some(index) = rest.first().and_then(|w| w.parse().ok()) else {
                    println!("play <card-index> [target-name]");
                    continue;
                };
                let target = rest.get(1).and_then(|name| seats.id_of(name));
                if rest.len() > 1 && target.is_none() {
                    println!("no such player");
                    continue;
                }
                run_as_current(
                    &manager,
                    game,
                    &seats,
                    Command::Play {
                        card_index: index,
                        target,
                    },
                );
            }
            "ability" => {
                let mut indices = Vec::new();
                let mut target = None;
                for word in rest {
                    match word.parse::<usize>() {
                        Ok(i) => indices.push(i),
                        Err(_) => target = seats.id_of(word),
                    }
                }
                run_as_current(&manager, game, &seats, Command::Ability { indices, target });
            }
            _ => match parse_response(head, rest, &seats) {
                Some(kind) => run_as_responder(&manager, game, &seats, kind),
                None => println!("unknown command, try 'help'"),
            },
        }
    }
}

fn help() {
    println!("lobby:    join <name> | start | reset | quit");
    println!("turn:     play <i> [target] | ability <i> [<j>] [target] | end");
    println!("respond:  card <i> | react <i> | pass | pick <i> | victim <name>");
    println!("          fromhand | fromtable <i> | grab <name> <i> | deckdraw");
    println!("info:     board | hand | help");
}

fn parse_response(head: &str, rest: &[&str], seats: &Seats) -> Option<ResponseKind> {
    let index = |n: usize| rest.get(n).and_then(|w| w.parse::<usize>().ok());
    match head {
        "card" => Some(ResponseKind::PlayCard { index: index(0)? }),
        "react" => Some(ResponseKind::UseInPlay { index: index(0)? }),
        "pass" => Some(ResponseKind::Pass),
        "pick" => Some(ResponseKind::PickCard { index: index(0)? }),
        "victim" => Some(ResponseKind::PickPlayer {
            target: rest.first().and_then(|name| seats.id_of(name))?,
        }),
        "fromhand" => Some(ResponseKind::FromHand),
        "fromtable" => Some(ResponseKind::FromTable { index: index(0)? }),
        "grab" => Some(ResponseKind::TakeInPlay {
            target: rest.first().and_then(|name| seats.id_of(name))?,
            index: index(1)?,
        }),
        "deckdraw" => Some(ResponseKind::DrawFromDeck),
        _ => None,
    }
}

#[derive(Default)]
struct Seats {
    ids: HashMap<String, Uuid>,
}

impl Seats {
    fn id_of(&self, name: &str) -> Option<Uuid> {
        self.ids.get(name).copied()
    }

    fn any(&self) -> Option<Uuid> {
        self.ids.values().next().copied()
    }
}

fn join(manager: &GameManager, game: GameId, seats: &mut Seats, name: &str) {
    match manager.join(game, name) {
        Ok((id, outcome)) => {
            seats.ids.insert(name.to_string(), id);
            report(&outcome);
        }
        Err(err) => println!("!! {err}"),
    }
}

/// Whoever the engine is waiting on holds the keyboard.
fn run_as_responder(manager: &GameManager, game: GameId, seats: &Seats, kind: ResponseKind) {
    let Ok(view) = manager.snapshot(game, None) else {
        println!("!! game is gone");
        return;
    };
    let Some(actor) = view.pending.as_ref().and_then(|p| p.awaiting) else {
        println!("nothing to respond to");
        return;
    };
    run(manager, game, seats, Some(actor), Command::Respond(kind));
}

fn run_as_current(manager: &GameManager, game: GameId, seats: &Seats, command: Command) {
    let Ok(view) = manager.snapshot(game, None) else {
        println!("!! game is gone");
        return;
    };
    let Some(actor) = view.current_player else {
        println!("the game has not started");
        return;
    };
    run(manager, game, seats, Some(actor), command);
}

fn run(
    manager: &GameManager,
    game: GameId,
    seats: &Seats,
    actor: Option<Uuid>,
    command: Command,
) {
    let Some(actor) = actor.or_else(|| seats.any()) else {
        println!("nobody has joined yet");
        return;
    };
    match manager.command(game, actor, command) {
        Ok(outcome) => report(&outcome),
        Err(SessionError::Game(err)) => println!("!! {err}"),
        Err(err) => println!("!! {err}"),
    }
}

fn report(outcome: &Outcome) {
    for line in &outcome.log {
        println!("  {line}");
    }
    println!("{}", outcome.message);
}

fn show_board(manager: &GameManager, game: GameId) {
    match manager.snapshot(game, None) {
        Ok(view) => print_board(&view),
        Err(err) => println!("!! {err}"),
    }
}

fn print_board(view: &GameView) {
    if let Some(event) = view.active_event {
        println!("event: {}", event.label());
    }
    println!("deck: {} cards", view.deck_size);
    for p in &view.players {
        let marker = if Some(p.id) == view.current_player {
            "->"
        } else {
            "  "
        };
        let role = p
            .role
            .map(|r| r.label().to_string())
            .unwrap_or_else(|| "?".to_string());
        let in_play: Vec<&str> = p.in_play.iter().map(|c| c.name.label()).collect();
        let status = if p.alive { "" } else { " [out]" };
        println!(
            "{marker} {} the {} ({role}) {}/{} hp, {} cards, table: [{}]{status}",
            p.name,
            p.character,
            p.hp,
            p.max_hp,
            p.hand_count,
            in_play.join(", "),
        );
    }
    if let Some(pending) = &view.pending {
        println!("waiting: {}", pending.kind);
        for (i, card) in pending.revealed.iter().enumerate() {
            println!("  [{i}] {}", card.name.label());
        }
    }
    if let Some(winner) = view.winner {
        println!("winner: {}", winner.label());
    }
}

/// Show the acting player's hand: the turn holder's, or the responder's
/// while an interrupt is open.
fn show_hand(manager: &GameManager, game: GameId, seats: &Seats) {
    let Ok(spectator) = manager.snapshot(game, None) else {
        println!("!! game is gone");
        return;
    };
    let actor = spectator
        .pending
        .as_ref()
        .and_then(|p| p.awaiting)
        .or(spectator.current_player)
        .or_else(|| seats.any());
    let Some(actor) = actor else {
        println!("nobody has joined yet");
        return;
    };
    let Ok(view) = manager.snapshot(game, Some(actor)) else {
        println!("!! game is gone");
        return;
    };
    for p in &view.players {
        if p.id != actor {
            continue;
        }
        println!("{}:", p.name);
        if let Some(hand) = &p.hand {
            for (i, card) in hand.iter().enumerate() {
                println!(
                    "  [{i}] {} ({:?} {:?})",
                    card.name.label(),
                    card.suit,
                    card.rank
                );
            }
        }
        for (i, card) in p.in_play.iter().enumerate() {
            println!("  table [{i}] {}", card.name.label());
        }
    }
}
