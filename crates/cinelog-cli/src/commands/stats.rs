use cinelog_dal::stats::CollectionStats;
use clap::Parser;

use crate::{
    commands::{read_json, Executor},
    config::ServerArgs,
};

#[derive(Parser, Debug)]
pub struct StatsCmd {
    #[command(flatten)]
    server: ServerArgs,
    #[arg(long, help = "Print raw JSON")]
    json: bool,
}

fn breakdown_lines(breakdown: &std::collections::HashMap<String, usize>) -> Vec<String> {
    let mut entries: Vec<_> = breakdown.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .map(|(key, count)| format!("  {key}: {count}"))
        .collect()
}

impl Executor for StatsCmd {
    async fn run(self) -> anyhow::Result<()> {
        let url = self.server.api_url("stats")?;
        let response = reqwest::get(url).await?;
        let stats: CollectionStats = read_json(response).await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }
        println!("Total movies:   {}", stats.total);
        println!("Completed:      {}", stats.completed);
        println!("Watching:       {}", stats.watching);
        println!("Want to Watch:  {}", stats.want_to_watch);
        println!("Average rating: {:.1}", stats.average_rating);
        println!("Total runtime:  {} min", stats.total_runtime);
        println!("Genres:");
        for line in breakdown_lines(&stats.genre_breakdown) {
            println!("{line}");
        }
        println!("Years:");
        for line in breakdown_lines(&stats.year_breakdown) {
            println!("{line}");
        }
        Ok(())
    }
}
