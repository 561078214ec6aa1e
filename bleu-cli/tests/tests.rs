#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use bleu::io::ext_repr::ExtStatus;
    use bleu::solver::Bleu;
    use bleu::util::BleuConfig;
    use clap::Parser;
    use log::LevelFilter;
    use test_case::test_case;

    use bleu_cli::config::load_config;
    use bleu_cli::io::cli::Cli;
    use bleu_cli::io::output::Output;
    use bleu_cli::{EPOCH, io};

    #[test_case("../assets/three_items.json", 8; "three_items")]
    #[test_case("../assets/four_squares.json", 4; "four_squares")]
    #[test_case("../assets/mixed.json", 5; "mixed")]
    fn test_instance(instance_path: &str, expected_height: u64) {
        let config = load_config(Some(Path::new("../assets/config.json"))).unwrap();
        let ext_instance = io::read_instance(Path::new(instance_path)).unwrap();
        let instance = bleu::io::import(&ext_instance).unwrap();

        let solver = Bleu::new(instance.clone(), config);
        let report = solver.minimize();
        let solution = bleu::io::export_height_search(&instance, &report, *EPOCH);

        assert_eq!(solution.status, ExtStatus::Feasible);
        assert_eq!(solution.height, expected_height);
        assert_eq!(solution.positions.len(), instance.n_items());
        assert!(solution.exact);

        let evaluation = solver.evaluate(expected_height as usize - 1);
        let below = bleu::io::export(&instance, &evaluation, solver.lower_bound(), *EPOCH);
        assert_eq!(below.status, ExtStatus::Infeasible);
        assert!(below.positions.is_empty());

        let output = Output {
            instance: ext_instance,
            solution,
            config,
        };
        let stem = Path::new(instance_path).file_stem().unwrap().to_str().unwrap();
        let path = std::env::temp_dir().join(format!("sol_{stem}.json"));
        io::write_json(&output, &path).unwrap();

        let written: Output = serde_json::from_reader(BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(written.solution, output.solution);
        assert_eq!(written.config, output.config);
    }

    #[test]
    fn missing_config_falls_back_to_default() {
        assert_eq!(load_config(None).unwrap(), BleuConfig::default());
        assert!(load_config(Some(Path::new("../assets/does_not_exist.json"))).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{"strip_width": 4, "items": [
            {"id": 0, "width": 1, "height": 1},
            {"id": 0, "width": 2, "height": 1}
        ]}"#;
        let ext_instance = serde_json::from_str(json).unwrap();
        assert!(bleu::io::import(&ext_instance).is_err());
    }

    #[test]
    fn cli_arguments() {
        let cli = Cli::try_parse_from([
            "bleu",
            "-i",
            "../assets/mixed.json",
            "-s",
            "solutions",
            "--height",
            "6",
        ])
        .unwrap();
        assert_eq!(cli.height, Some(6));
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert!(cli.config_file.is_none());

        assert!(Cli::try_parse_from(["bleu", "-i", "../assets/mixed.json"]).is_err());
    }
}
