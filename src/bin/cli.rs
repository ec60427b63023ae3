use pv_dashboard::config::DashboardConfig;
use pv_dashboard::downloader::to_csv;
use pv_dashboard::section::Dashboard;
use std::env;

fn usage(program: &str) {
    eprintln!("Usage: {} <data_dir> list", program);
    eprintln!("       {} <data_dir> <section> <first> <second>", program);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
        return Ok(());
    }

    let config = DashboardConfig::load(&args[1..2])?;
    let dashboard = Dashboard::new(&config.data_dir);

    match &args[2..] {
        [cmd] if cmd == "list" => {
            for section in dashboard.sections() {
                println!("{} - {}", section.id, section.heading);
                for first in dashboard.first_choices(section.id)? {
                    println!("  {}", first);
                    match dashboard.second_choices(section.id, &first) {
                        Ok(choices) => {
                            for second in choices {
                                println!("    {}", second);
                            }
                        }
                        Err(e) => println!("    ({})", e),
                    }
                }
            }
        }
        [section, first, second] => {
            let view = dashboard.render(section, first, second)?;
            if !view.series.title.is_empty() {
                println!("{}", view.series.title);
            }
            if !view.caption.is_empty() {
                println!("{}", view.caption);
            }
            print!("{}", to_csv(&view.series));
        }
        _ => usage(&args[0]),
    }

    Ok(())
}
