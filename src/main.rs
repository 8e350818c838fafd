//! Pancake Flip entry point
//!
//! Minimal terminal front-end over the core: renders the stack as text,
//! reads flip indices from stdin, and persists progression after every
//! completed mutation. A web presentation layer embeds the library crate
//! directly and brings its own rendering and input handling.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead, Write};

    use pancake_flip::LevelCatalog;
    use pancake_flip::audio::{NullSink, SoundEvent, SoundSink};
    use pancake_flip::persistence;
    use pancake_flip::platform::FileStore;
    use pancake_flip::progress::{Advance, ProgressionTracker};

    const DEFAULT_SAVE_FILE: &str = "pancake_flip_save.json";

    pub fn run() -> io::Result<()> {
        let save_path = std::env::var_os("PANCAKE_FLIP_SAVE")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| DEFAULT_SAVE_FILE.into());
        let mut store = FileStore::open(save_path);
        let progress = persistence::load_progress(&store);
        let mut tracker = ProgressionTracker::with_progress(LevelCatalog::builtin(), progress);
        // Terminal build plays nothing; a richer shell injects its own sink
        let mut sound = NullSink;

        println!("Pancake Flip - flip suffixes until the discs run small to large");
        println!("commands: <index> flip, g <id> go to level, l levels, r retry, reset, q quit");
        print_level(&tracker);
        prompt()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let input = line.trim();
            match input {
                "" => {}
                "q" | "quit" => break,
                "l" | "levels" => print_level_select(&tracker),
                "r" | "retry" => {
                    let id = tracker.current_level();
                    if tracker.go_to_level(id).is_ok() {
                        print_level(&tracker);
                    }
                }
                "reset" => {
                    tracker.reset();
                    persistence::save_progress(&mut store, tracker.progress());
                    println!("progress wiped");
                    print_level(&tracker);
                }
                _ => {
                    if let Some(rest) = input.strip_prefix("g ") {
                        go_to_level(&mut tracker, &mut store, rest);
                    } else {
                        flip(&mut tracker, &mut store, &mut sound, input);
                    }
                }
            }
            prompt()?;
        }
        Ok(())
    }

    fn prompt() -> io::Result<()> {
        print!("> ");
        io::stdout().flush()
    }

    fn go_to_level(tracker: &mut ProgressionTracker, store: &mut FileStore, arg: &str) {
        let Ok(id) = arg.trim().parse::<u32>() else {
            println!("usage: g <level id>");
            return;
        };
        match tracker.go_to_level(id) {
            Ok(()) => {
                persistence::save_progress(store, tracker.progress());
                print_level(tracker);
            }
            Err(err) => println!("{err}"),
        }
    }

    fn flip(
        tracker: &mut ProgressionTracker,
        store: &mut FileStore,
        sound: &mut dyn SoundSink,
        input: &str,
    ) {
        let Ok(index) = input.parse::<usize>() else {
            println!("enter a flip index, g <id>, l, r, reset, or q");
            return;
        };
        match tracker.request_move(index) {
            Ok(_) => sound.play(SoundEvent::Flip),
            Err(err) => {
                println!("{err}");
                return;
            }
        }
        print_stack(tracker.arrangement());
        println!(
            "moves: {} (par {})",
            tracker.moves_this_level(),
            tracker.par()
        );

        if tracker.is_solved() {
            sound.play(SoundEvent::Victory);
            let report = tracker.complete_level();
            persistence::save_progress(store, tracker.progress());
            sound.play(SoundEvent::StarEarned);
            println!(
                "level {} cleared in {} moves: {} (best {}, total {})",
                report.level,
                report.moves,
                "*".repeat(report.stars as usize),
                report.best_stars,
                report.total_stars,
            );
            match report.advance {
                Advance::Next(id) => {
                    sound.play(SoundEvent::LevelUnlocked);
                    println!("level {id} unlocked");
                    print_level(tracker);
                }
                Advance::CatalogExhausted => {
                    println!("that was the last level - you've cleared them all!");
                }
            }
        }
    }

    fn print_level(tracker: &ProgressionTracker) {
        println!(
            "level {} (par {} moves)",
            tracker.current_level(),
            tracker.par()
        );
        print_stack(tracker.arrangement());
    }

    fn print_stack(arrangement: &[u8]) {
        for (index, &size) in arrangement.iter().enumerate() {
            println!("  {index} | {}", "o".repeat(usize::from(size)));
        }
    }

    fn print_level_select(tracker: &ProgressionTracker) {
        for level in tracker.catalog().iter() {
            if tracker.is_unlocked(level.id) {
                println!(
                    "  {:>2}  {:<3}  par {}",
                    level.id,
                    "*".repeat(usize::from(tracker.stars_for(level.id))),
                    level.min_moves,
                );
            } else {
                println!("  {:>2}  [locked]", level.id);
            }
        }
        println!("total stars: {}", tracker.total_stars());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Pancake Flip (terminal) starting...");
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds embed the library from the web shell; nothing to run here
}
