use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use wordgame_solver::{
    dedup_solutions, generate_board, generate_simple_board, load_solver, sort_solutions, unescape,
    Board, GameConfig, GameRuleSet, Solution, SolutionAnalysis, Solver, Validator,
};

#[derive(Debug, Parser)]
#[command(name = "wgs", about = "Configurable word game solver and board generator")]
struct Args {
    /// Game configuration file (JSON)
    config: String,

    /// Seed for the random source (deterministic runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Log validator and generator decisions to stderr
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print "<words> <points>" for each board read from standard input
    Score { game: String },

    /// Print formatted solutions for each board read from standard input
    Solve {
        game: String,
        format: Option<String>,
        prefix: Option<String>,
        suffix: Option<String>,
    },

    /// Like solve, but duplicate solutions are reported
    SolveDups {
        game: String,
        format: Option<String>,
        prefix: Option<String>,
        suffix: Option<String>,
    },

    /// Print per-board analysis for each board read from standard input
    Analyze {
        game: String,
        format: Option<String>,
        /// Pass "dump-words" to dump distinct word counts to stderr at EOF
        mode: Option<String>,
    },

    /// Generate random boards, one per line
    Create {
        game: String,
        #[arg(default_value_t = 1)]
        boards: usize,
        #[arg(default_value_t = 0)]
        min_words: usize,
        #[arg(default_value_t = 0)]
        min_score: usize,
        /// Pass "minimize" to drive word count and score down instead
        mode: Option<String>,
    },

    /// Check words from standard input against the letter distribution
    CheckWord {
        game: String,
        /// "stats" prints strategy counters at EOF, "verbose" logs decisions
        mode: Option<String>,
    },

    /// Check boards from standard input against the letter distribution
    CheckBoard {
        game: String,
        /// Pass "stats" to print strategy counters at EOF
        mode: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let verbose = args.verbose
        || matches!(
            &args.command,
            Command::CheckWord { mode: Some(mode), .. } if mode.as_str() == "verbose"
        );
    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = GameConfig::from_file(&args.config)?;

    match args.command {
        Command::Score { game } => {
            let ruleset = GameRuleSet::resolve(&config, &game)?;
            let mut solver = load_solver(&ruleset.dictionary)?;
            for line in lines() {
                let solutions = solve_line(&mut solver, &ruleset, &line, true);
                let points: u32 = solutions.iter().map(Solution::score).sum();
                println!("{} {}", solutions.len(), points);
            }
        }
        Command::Solve {
            game,
            format,
            prefix,
            suffix,
        } => run_solve(&config, &game, format, prefix, suffix, true)?,
        Command::SolveDups {
            game,
            format,
            prefix,
            suffix,
        } => run_solve(&config, &game, format, prefix, suffix, false)?,
        Command::Analyze { game, format, mode } => {
            let ruleset = GameRuleSet::resolve(&config, &game)?;
            let mut solver = load_solver(&ruleset.dictionary)?;
            let fmt = format
                .or_else(|| preference(&ruleset, "AnalysisFormat"))
                .unwrap_or_default();
            let dump_words = mode.as_deref() == Some("dump-words");
            let mut word_counts: BTreeMap<String, usize> = BTreeMap::new();

            for line in lines() {
                let board = Board::new(&line, &ruleset.grid);
                solver.solve(&board, &ruleset.scoring);
                let mut solutions = solver.solutions().to_vec();
                sort_solutions(&mut solutions);
                let analysis = SolutionAnalysis::new(&board, &solutions);
                print!("{}", analysis.format(&fmt, 0));

                if dump_words {
                    dedup_solutions(&mut solutions);
                    for solution in &solutions {
                        *word_counts.entry(String::from(solution.word())).or_default() += 1;
                    }
                }
            }

            if dump_words {
                for (word, count) in &word_counts {
                    eprintln!("{} {}", word, count);
                }
            }
        }
        Command::Create {
            game,
            boards,
            min_words,
            min_score,
            mode,
        } => {
            let ruleset = GameRuleSet::resolve(&config, &game)?;
            let reverse_target = mode.as_deref() == Some("minimize");

            if min_words == 0 && min_score == 0 && !reverse_target {
                for _ in 0..boards {
                    println!("{}", generate_simple_board(&ruleset, &mut rng)?);
                }
            } else {
                let mut solver = load_solver(&ruleset.dictionary)?;
                for _ in 0..boards {
                    let letters = generate_board(
                        &ruleset,
                        &mut solver,
                        min_words,
                        min_score,
                        reverse_target,
                        &mut rng,
                    )?;
                    let board = Board::new(&letters, &ruleset.grid);
                    solver.solve(&board, &ruleset.scoring);
                    let mut solutions = solver.solutions().to_vec();
                    sort_solutions(&mut solutions);
                    let analysis = SolutionAnalysis::new(&board, &solutions);
                    println!("{}", analysis.format("%B %W %S", 0));
                }
            }
        }
        Command::CheckWord { game, mode } => {
            check(&config, &game, &mode, true)?;
        }
        Command::CheckBoard { game, mode } => {
            check(&config, &game, &mode, false)?;
        }
    }

    Ok(())
}

fn lines() -> impl Iterator<Item = String> {
    io::stdin().lock().lines().map_while(Result::ok)
}

fn preference(ruleset: &GameRuleSet, key: &str) -> Option<String> {
    ruleset.preferences.preference(key).map(String::from)
}

fn solve_line(
    solver: &mut Solver,
    ruleset: &GameRuleSet,
    line: &str,
    dedup: bool,
) -> Vec<Solution> {
    let board = Board::new(line, &ruleset.grid);
    solver.solve(&board, &ruleset.scoring);
    let mut solutions = solver.solutions().to_vec();
    sort_solutions(&mut solutions);
    if dedup {
        dedup_solutions(&mut solutions);
    }
    solutions
}

fn run_solve(
    config: &GameConfig,
    game: &str,
    format: Option<String>,
    prefix: Option<String>,
    suffix: Option<String>,
    dedup: bool,
) -> Result<()> {
    let ruleset = GameRuleSet::resolve(config, game)?;
    let mut solver = load_solver(&ruleset.dictionary)?;

    let fmt = format
        .or_else(|| preference(&ruleset, "SolutionFormat"))
        .unwrap_or_default();
    let prefix = unescape(
        &prefix
            .or_else(|| preference(&ruleset, "SolutionPrefix"))
            .unwrap_or_default(),
    );
    let suffix = unescape(
        &suffix
            .or_else(|| preference(&ruleset, "SolutionSuffix"))
            .unwrap_or_default(),
    );

    for line in lines() {
        let solutions = solve_line(&mut solver, &ruleset, &line, dedup);
        print!("{}", prefix);
        for (i, solution) in solutions.iter().enumerate() {
            print!("{}", solution.format(&fmt, i + 1 != solutions.len()));
        }
        print!("{}", suffix);
    }
    Ok(())
}

fn check(config: &GameConfig, game: &str, mode: &Option<String>, interpret: bool) -> Result<()> {
    let ruleset = GameRuleSet::resolve(config, game)?;
    match mode.as_deref() {
        None | Some("stats") | Some("verbose") => {}
        Some(other) => bail!("Unknown option '{}'", other),
    }

    let mut validator = Validator::new();
    for line in lines() {
        let valid = validator.validate(&ruleset, &line, interpret);
        println!("{}{}", if valid { '+' } else { '-' }, line);
    }

    if mode.is_some() {
        eprintln!("{}", validator.stats());
    }
    Ok(())
}
