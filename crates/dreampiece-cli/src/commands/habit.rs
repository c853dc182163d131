use chrono::{Local, Utc};
use clap::Subcommand;
use dreampiece_core::{Database, Habit, HabitTracker};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with today's progress
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a habit
    Add {
        /// Habit name
        name: String,
        /// Category label
        #[arg(long, default_value = "General")]
        category: String,
        #[arg(long)]
        json: bool,
    },
    /// Flip a habit between done and not done
    Toggle {
        /// Position shown by `habit list`
        index: usize,
        #[arg(long)]
        json: bool,
    },
    /// Delete a habit
    Delete {
        /// Position shown by `habit list`
        index: usize,
        #[arg(long)]
        json: bool,
    },
    /// Mark every habit as not done
    Reset {
        #[arg(long)]
        json: bool,
    },
}

fn print_habit(index: usize, habit: &Habit) {
    let mark = if habit.completed { "x" } else { " " };
    println!("{index:>2}. [{mark}] {} ({})", habit.name, habit.category);
}

fn print_list(tracker: &HabitTracker, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = tracker.stats(Local::now().date_naive(), &Local);
    if json {
        let out = serde_json::json!({
            "habits": tracker.habits(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    for (i, habit) in tracker.habits().iter().enumerate() {
        print_habit(i, habit);
    }
    println!(
        "Done today: {}  Streak: {}",
        stats.today_completed, stats.current_streak
    );
    Ok(())
}

fn print_one(habit: &Habit, verb: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(habit)?);
    } else {
        println!("{verb}: {}", habit.name);
    }
    Ok(())
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = Utc::now();
    let mut tracker = HabitTracker::load(&db, now)?;

    match action {
        HabitAction::List { json } => print_list(&tracker, json)?,
        HabitAction::Add {
            name,
            category,
            json,
        } => {
            let habit = tracker.add(&db, &name, &category, now)?;
            print_one(habit, "Added", json)?;
        }
        HabitAction::Toggle { index, json } => {
            let habit = tracker.toggle(&db, index, now)?;
            let verb = if habit.completed { "Done" } else { "Not done" };
            print_one(habit, verb, json)?;
        }
        HabitAction::Delete { index, json } => {
            let habit = tracker.delete(&db, index)?;
            print_one(&habit, "Deleted", json)?;
        }
        HabitAction::Reset { json } => {
            tracker.reset_all(&db, now)?;
            print_list(&tracker, json)?;
        }
    }
    Ok(())
}
