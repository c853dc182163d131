use chrono::Local;
use clap::Subcommand;
use dreampiece_core::exam;
use dreampiece_core::Database;

#[derive(Subcommand)]
pub enum ExamAction {
    /// Days left until the exam
    Show,
    /// Set the exam date (YYYY-MM-DD)
    Set { date: String },
}

pub fn run(action: ExamAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = Local::now().date_naive();

    match action {
        ExamAction::Show => {
            match exam::load_exam_date(&db)? {
                Some(date) => println!("Exam on {date}"),
                None => println!("No exam date set"),
            }
            println!("Days left: {}", exam::days_until_stored(&db, today)?);
        }
        ExamAction::Set { date } => {
            let date = exam::save_exam_date(&db, &date)?;
            println!("Exam on {date}");
            println!("Days left: {}", exam::days_until(date, today));
        }
    }
    Ok(())
}
