//! CLI module for adversario
//!
//! Argument parsing and the command handlers behind the binary.

mod args;
mod commands;

pub use args::{parse_args, Cli, Command, SampleArgs, TrainArgs, ValidateArgs};
pub use commands::run_command;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_train_command() {
        let cli = parse_args(["adversario", "train", "gan.yaml"]).unwrap();
        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.config, PathBuf::from("gan.yaml"));
                assert!(!args.dry_run);
                assert_eq!(args.overrides(), Default::default());
            }
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_parse_train_with_overrides() {
        let cli = parse_args([
            "adversario",
            "train",
            "gan.yaml",
            "--epochs",
            "10",
            "--batch-size",
            "32",
            "--snapshot-interval",
            "250",
            "--seed",
            "7",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Command::Train(args) => {
                let overrides = args.overrides();
                assert_eq!(overrides.epochs, Some(10));
                assert_eq!(overrides.batch_size, Some(32));
                assert_eq!(overrides.snapshot_interval, Some(250));
                assert_eq!(overrides.seed, Some(7));
                assert!(args.dry_run);
            }
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_parse_sample_with_z() {
        let cli = parse_args(["adversario", "sample", "ckt/exp_500.ckpt", "--z", "-0.5,0,1.25"])
            .unwrap();
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.checkpoint, PathBuf::from("ckt/exp_500.ckpt"));
                assert_eq!(args.z, Some(vec![-0.5, 0.0, 1.25]));
                assert_eq!(args.log_dir, PathBuf::from("logs"));
                assert_eq!(args.checkpoint_root, PathBuf::from("ckt"));
            }
            _ => panic!("Expected Sample command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["adversario", "validate", "gan.yaml", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn test_missing_config_is_error() {
        assert!(parse_args(["adversario", "train"]).is_err());
    }
}
