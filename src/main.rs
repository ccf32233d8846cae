use chrono::Local;
use p4n_export::{
    config::Config,
    info_time,
    process::{process_site, Pacing},
    prompt::StdinPrompt,
    request::HttpSite,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    println!("Park4Night Bookmark Extractor");
    println!("----------------------------");

    let config = Config::load()?;
    let site = HttpSite::new(&config);
    let mut prompt = StdinPrompt;

    process_site(&config, &site, Pacing::from(&config), &mut prompt).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
