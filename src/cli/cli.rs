//! Interactive CLI for occurrence queries.
//!
//! Reads one command per line against a loaded [`API`].
use super::command::Command;
use crate::api::*;
use crate::query;
use clap::Parser;
use std::io::BufRead;
use std::io::Write;

pub struct CLI(API);

impl From<API> for CLI {
    fn from(api: API) -> Self {
        Self(api)
    }
}

impl CLI {
    pub async fn run(self) -> anyhow::Result<()> {
        log::info!("entering occurrence query shell");
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                break Ok(());
            };
            match line.trim() {
                "" => continue,
                "quit" | "exit" => break Ok(()),
                input => match self.handle(input).await {
                    Err(e) => eprintln!("{}", e),
                    Ok(output) => println!("{}", output),
                },
            }
        }
    }

    /// Execute one command line and render its result.
    pub async fn handle(&self, input: &str) -> anyhow::Result<String> {
        let command = Command::try_parse_from(std::iter::once("> ").chain(input.split_whitespace()))?;
        match command {
            Command::Species => Ok(query::census(self.0.data())
                .into_iter()
                .map(|(name, n)| format!(" - {:<32} {:>6}", name, n))
                .collect::<Vec<_>>()
                .join("\n")),
            Command::Records {
                name,
                limit,
                start,
                end,
            } => {
                let req = SetRecords {
                    limit,
                    start_date: start,
                    end_date: end,
                };
                Ok(self
                    .0
                    .records(&name.join(" "), &req)?
                    .records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| {
                        format!(
                            "{:>4}. {:<19} {:>9} {:>10}  sst {:>6} sss {:>6} depth {:>7}",
                            i + 1,
                            r.event_date.as_deref().unwrap_or("-"),
                            fmt(r.decimal_latitude),
                            fmt(r.decimal_longitude),
                            fmt(r.sst),
                            fmt(r.sss),
                            fmt(r.depth),
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Environment { name } => {
                let env = self.0.environment(&name.join(" "))?.environment;
                Ok([("sst", env.sst), ("sss", env.sss), ("depth", env.depth)]
                    .iter()
                    .map(|(field, s)| {
                        format!(
                            "{:<6} n={:<6} min {:>9} max {:>9} mean {:>9} median {:>9}",
                            field,
                            s.count,
                            fmt(s.min),
                            fmt(s.max),
                            fmt(s.mean),
                            fmt(s.median),
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Nearest { lat, lon } => {
                let hit = self.0.nearest(lat, lon)?;
                Ok(format!(
                    "{} at ({:.4}, {:.4}) on {}, {:.4} degrees away",
                    hit.nearest_species.as_deref().unwrap_or("-"),
                    hit.nearest_lat,
                    hit.nearest_lon,
                    hit.event_date.as_deref().unwrap_or("-"),
                    hit.distance_degrees,
                ))
            }
            Command::Predict {
                name,
                sst,
                sss,
                depth,
            } => {
                let req = SetPredict {
                    species: name.join(" "),
                    sst,
                    sss,
                    depth,
                    decimal_latitude: None,
                    decimal_longitude: None,
                };
                let res = self.0.predict(&req).await?;
                Ok(format!("{} {:.4}", res.species, res.probability))
            }
        }
    }
}

fn fmt(x: Option<f64>) -> String {
    x.map(|x| format!("{:.3}", x)).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Repository;
    use crate::occurrence::Dataset;
    use crate::occurrence::Occurrence;
    use crate::occurrence::timestamp;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn cli(dir: &TempDir) -> CLI {
        let data = Dataset::from(vec![
            Occurrence::new(0, "Thunnus albacares", timestamp::parse("2021-01-01"), Some((12., 22.)), [Some(28.), None, Some(40.)]),
            Occurrence::new(0, "Sardinella longiceps", None, Some((10., 75.)), [None; 3]),
        ]);
        CLI::from(API::new(Arc::new(data), Repository::new(dir.path())))
    }

    #[tokio::test]
    async fn species_lists_counts() {
        let dir = TempDir::new().unwrap();
        let out = cli(&dir).handle("species").await.unwrap();
        assert!(out.contains("Sardinella longiceps"));
        assert!(out.contains("Thunnus albacares"));
    }

    #[tokio::test]
    async fn records_render_dates() {
        let dir = TempDir::new().unwrap();
        let out = cli(&dir).handle("records thunnus albacares").await.unwrap();
        assert!(out.contains("2021-01-01T00:00:00"));
    }

    #[tokio::test]
    async fn nearest_names_the_species() {
        let dir = TempDir::new().unwrap();
        let out = cli(&dir).handle("nn 10 74").await.unwrap();
        assert!(out.starts_with("Sardinella longiceps"));
    }

    #[tokio::test]
    async fn errors_propagate() {
        let dir = TempDir::new().unwrap();
        assert!(cli(&dir).handle("env Mola mola").await.is_err());
        assert!(cli(&dir).handle("predict Mola mola").await.is_err());
        assert!(cli(&dir).handle("bogus").await.is_err());
    }
}
