use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub enum Command {
    #[command(about = "List every species with its record count", alias = "ls")]
    Species,
    #[command(about = "Show records of a species, newest first", alias = "rec")]
    Records {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        #[arg(long, short)]
        limit: Option<usize>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    #[command(about = "Summarize sst, sss and depth for a species", alias = "env")]
    Environment {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(
        about = "Find the occurrence closest to a coordinate",
        alias = "nn",
        allow_negative_numbers = true
    )]
    Nearest {
        #[arg(required = true)]
        lat: f64,
        #[arg(required = true)]
        lon: f64,
    },
    #[command(
        about = "Score habitat probability for a species",
        alias = "p",
        allow_negative_numbers = true
    )]
    Predict {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        #[arg(long)]
        sst: Option<f64>,
        #[arg(long)]
        sss: Option<f64>,
        #[arg(long)]
        depth: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::try_parse_from(std::iter::once("> ").chain(line.split_whitespace())).unwrap()
    }

    #[test]
    fn multiword_species_names() {
        match parse("records Thunnus albacares --limit 3") {
            Command::Records { name, limit, .. } => {
                assert_eq!(name.join(" "), "Thunnus albacares");
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negative_coordinates() {
        match parse("nn -12.5 -40") {
            Command::Nearest { lat, lon } => assert_eq!((lat, lon), (-12.5, -40.)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn aliases() {
        assert!(matches!(parse("ls"), Command::Species));
        assert!(matches!(parse("env Mola mola"), Command::Environment { .. }));
        assert!(matches!(parse("p Mola mola --sst 20"), Command::Predict { .. }));
    }
}
