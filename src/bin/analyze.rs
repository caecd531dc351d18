use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use num_traits::ToPrimitive;

use stackrace::{
    best_market_ev, draw_action_ev, enumerate_round, list_bets, load_config_from_json,
    loser_of, rng_for_stream, simulate_race, BetKind, GameConfig, RaceEstimate, Session,
};

#[derive(Debug, Parser)]
#[command(name = "analyze", about = "Stackrace board analytics tool")]
struct Args {
    /// Game configuration JSON (defaults to the built-in six-piece game)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random draws to play before analyzing
    #[arg(long, default_value_t = 0)]
    draws: u32,

    /// Monte-Carlo trials for the race estimate (overrides the config)
    #[arg(long)]
    sims: Option<usize>,

    /// How many bets of the market board to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Seed for the draw and simulation RNG (deterministic)
    #[arg(long, default_value_t = 0x00C0_FFEEu64)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => load_config_from_json(path)?,
        None => GameConfig::default(),
    };
    let sims = args.sims.unwrap_or(cfg.race_sims);

    let mut session = Session::new(&cfg);
    let mut rng = rng_for_stream(args.seed, 0);
    for _ in 0..args.draws {
        match session.draw(&cfg, &mut rng) {
            Ok(drawn) => {
                let mut line = format!(
                    "draw: {} {:+}",
                    cfg.name(drawn.piece),
                    drawn.roll
                );
                if let Some(w) = drawn.winner {
                    line.push_str(&format!("  -> race won by {}", cfg.name(w)));
                }
                println!("{line}");
            }
            Err(e) => {
                println!("{e}");
                break;
            }
        }
    }

    let state = session.state();
    println!(
        "\nround: {}/{} draws taken, pending: {}",
        state.draws_taken,
        cfg.draws_per_round,
        state
            .pending()
            .iter()
            .map(|&p| cfg.name(p))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let mut positions: Vec<_> = state.board.occupied().collect();
    positions.sort_by_key(|(pos, _)| *pos);
    for (pos, stack) in positions {
        let names: Vec<_> = stack.iter().map(|&p| cfg.name(p)).collect();
        println!("  {pos:>3}: [{}]  (bottom..top)", names.join(", "));
    }

    let round = enumerate_round(state, &cfg);
    println!("\nexact round tables ({} worlds):", round.total_worlds);
    for piece in cfg.rank_pieces() {
        let i = piece.index();
        println!(
            "  {:<8} P(1st)={:<10} P(2nd)={:<10} E[pos]={:.3}",
            cfg.name(piece),
            round.first[i].to_string(),
            round.second[i].to_string(),
            round.expected_position[i].to_f64().unwrap_or(0.0),
        );
    }

    let race = if let Some(winner) = session.race_winner {
        println!("\nrace already won by {}", cfg.name(winner));
        RaceEstimate::decided(cfg.piece_count(), Some(winner), loser_of(&state.board, &cfg))
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("[{elapsed_precise}] {msg}")?);
        pb.set_message(format!("simulating {sims} races"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        let race = simulate_race(state, &cfg, sims, args.seed);
        pb.finish_with_message(format!(
            "simulated {sims} races, mean length {:.1} draws",
            race.mean_draws
        ));
        race
    };
    for piece in cfg.rank_pieces() {
        let i = piece.index();
        println!(
            "  {:<8} P(win)={:<7.4} P(lose)={:<7.4}",
            cfg.name(piece),
            race.win[i],
            race.lose[i]
        );
    }

    println!("\nmarket (top {}):", args.top);
    for quote in list_bets(&round, &race, &cfg).into_iter().take(args.top) {
        let kind = match quote.kind {
            BetKind::RoundPlace => "round 1st",
            BetKind::RaceWin => "race win",
            BetKind::RaceLoss => "race loss",
        };
        println!(
            "  {:<8} {:<10} T={:<2} EV={:+.4}",
            cfg.name(quote.piece),
            kind,
            quote.tier,
            quote.ev
        );
    }
    println!(
        "best market EV: {:+.4}",
        best_market_ev(&round, &race, &cfg)
    );

    if session.race_winner.is_none() {
        let ev = draw_action_ev(state, &round, &race, &cfg, args.seed);
        println!("draw action EV: {ev:+.4}");
    }

    Ok(())
}
