// Copyright (C) Pavel Grebnev 2023-2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Convert(PathBuf),
    Color(String),
    Hex(String),
    Swatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    PerColor,
    Fixed,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppArguments {
    pub action: Option<Action>,
    pub rgb_values: Vec<String>,
    pub colors_file: Option<PathBuf>,
    pub layout: Option<LayoutKind>,
    pub reject_out_of_range: bool,
    pub custom_config_path: Option<String>,
    pub log_level: Option<String>,
    // text that should be printed instead of running anything (help, version)
    pub print_and_exit: Option<String>,
    pub read_error: Option<String>,
}

struct ArgumentDefinition {
    name: &'static str,
    syntax: &'static str,
    description: &'static str,
    number_of_args: usize,
}

const SUPPORTED_ARGS: &[ArgumentDefinition] = &[
    ArgumentDefinition {
        name: "--help",
        syntax: "--help",
        description: "Show this help",
        number_of_args: 0,
    },
    ArgumentDefinition {
        name: "--version",
        syntax: "--version",
        description: "Show the application version",
        number_of_args: 0,
    },
    ArgumentDefinition {
        name: "--convert",
        syntax: "--convert <path>",
        description: "Show every r,g,b line of the file in its own window, one after another",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--color",
        syntax: "--color <r,g,b|#rrggbb>",
        description: "Show one color in a window",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--hex",
        syntax: "--hex <r,g,b>",
        description: "Print the hex code of the color without opening a window",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--swatch",
        syntax: "--swatch <title>",
        description: "Show the colors side by side in one window with the given title",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--rgb",
        syntax: "--rgb <r,g,b[,a]>",
        description: "Add a color to the swatch, can be repeated",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--colors-file",
        syntax: "--colors-file <path>",
        description: "Read the swatch colors from a file, one per line",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--layout",
        syntax: "--layout <per-color|fixed>",
        description: "Grow the swatch window with the colors or keep a fixed width",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--reject-out-of-range",
        syntax: "--reject-out-of-range",
        description: "Fail on channel values outside of [0, 255] instead of clamping them",
        number_of_args: 0,
    },
    ArgumentDefinition {
        name: "--config-path",
        syntax: "--config-path <path>",
        description: "Set custom path to the config file",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--log-level",
        syntax: "--log-level <filter>",
        description: "Set the log filter, e.g. swatcher=debug",
        number_of_args: 1,
    },
];

pub fn get_app_arguments() -> AppArguments {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_app_arguments(&args)
}

fn with_error(text: String) -> AppArguments {
    AppArguments {
        read_error: Some(format!(
            "{}\nUse --help to see the list of supported arguments",
            text
        )),
        ..Default::default()
    }
}

fn get_help_text() -> String {
    let mut help_text = "Supported arguments:\n".to_string();
    let max_syntax_len = SUPPORTED_ARGS
        .iter()
        .map(|arg| arg.syntax.len())
        .max()
        .unwrap_or(0);
    for arg in SUPPORTED_ARGS {
        help_text.push_str(arg.syntax);
        for _ in 0..max_syntax_len - arg.syntax.len() + 1 {
            help_text.push(' ');
        }
        help_text.push_str(arg.description);
        help_text.push('\n');
    }
    help_text.push('\n');
    help_text.push_str("Example: swatcher --swatch Hist --rgb 168,105,105 --rgb 71,91,104");
    return help_text;
}

/// Parses arguments without the executable name.
pub fn parse_app_arguments(args: &[String]) -> AppArguments {
    let mut result = AppArguments::default();

    let mut i: usize = 0;
    while i < args.len() {
        let arg = &args[i];

        let found_arg = SUPPORTED_ARGS
            .iter()
            .find(|supported_arg| supported_arg.name == arg);

        let Some(found_arg) = found_arg else {
            return with_error(format!("Unknown argument: {}", arg));
        };

        if found_arg.number_of_args > 0 && i + found_arg.number_of_args >= args.len() {
            return with_error(format!("Not enough arguments for {}", arg));
        }
        let value = args.get(i + 1).cloned().unwrap_or_default();

        let action = match found_arg.name {
            "--help" => {
                return AppArguments {
                    print_and_exit: Some(get_help_text()),
                    ..Default::default()
                };
            }
            "--version" => {
                return AppArguments {
                    print_and_exit: Some(env!("CARGO_PKG_VERSION").to_string()),
                    ..Default::default()
                };
            }
            "--convert" => Some(Action::Convert(PathBuf::from(value))),
            "--color" => Some(Action::Color(value)),
            "--hex" => Some(Action::Hex(value)),
            "--swatch" => Some(Action::Swatch(value)),
            "--rgb" => {
                result.rgb_values.push(value);
                None
            }
            "--colors-file" => {
                result.colors_file = Some(PathBuf::from(value));
                None
            }
            "--layout" => {
                result.layout = match value.as_str() {
                    "per-color" => Some(LayoutKind::PerColor),
                    "fixed" => Some(LayoutKind::Fixed),
                    _ => return with_error(format!("Unknown layout: {}", value)),
                };
                None
            }
            "--reject-out-of-range" => {
                result.reject_out_of_range = true;
                None
            }
            "--config-path" => {
                result.custom_config_path = Some(value);
                None
            }
            "--log-level" => {
                result.log_level = Some(value);
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            if result.action.is_some() {
                return with_error(
                    "Only one of --convert, --color, --hex and --swatch can be used at a time"
                        .to_string(),
                );
            }
            result.action = Some(action);
        }

        i += 1 + found_arg.number_of_args;
    }

    if result.action.is_none() {
        return with_error("Nothing to do".to_string());
    }

    let is_swatch = matches!(result.action, Some(Action::Swatch(_)));
    if !is_swatch && (!result.rgb_values.is_empty() || result.colors_file.is_some()) {
        return with_error("--rgb and --colors-file can only be used with --swatch".to_string());
    }
    if !result.rgb_values.is_empty() && result.colors_file.is_some() {
        return with_error("--rgb and --colors-file can't be used together".to_string());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppArguments {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        parse_app_arguments(&args)
    }

    #[test]
    fn test_convert_takes_a_path() {
        let app_arguments = parse(&["--convert", "colors.txt"]);

        assert_eq!(app_arguments.read_error, None);
        assert_eq!(
            app_arguments.action,
            Some(Action::Convert(PathBuf::from("colors.txt")))
        );
    }

    #[test]
    fn test_swatch_collects_repeated_colors_and_options() {
        let app_arguments = parse(&[
            "--swatch",
            "Hist",
            "--rgb",
            "168,105,105",
            "--rgb",
            "71,91,104",
            "--layout",
            "fixed",
            "--reject-out-of-range",
            "--log-level",
            "swatcher=debug",
        ]);

        assert_eq!(app_arguments.read_error, None);
        assert_eq!(app_arguments.action, Some(Action::Swatch("Hist".to_string())));
        assert_eq!(app_arguments.rgb_values, vec!["168,105,105", "71,91,104"]);
        assert_eq!(app_arguments.layout, Some(LayoutKind::Fixed));
        assert!(app_arguments.reject_out_of_range);
        assert_eq!(app_arguments.log_level.as_deref(), Some("swatcher=debug"));
    }

    #[test]
    fn test_help_and_version_are_printed() {
        let help = parse(&["--help"]);
        let version = parse(&["--color", "1,2,3", "--version"]);

        assert!(help.print_and_exit.unwrap().contains("--swatch <title>"));
        assert_eq!(
            version.print_and_exit.as_deref(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_unknown_argument_is_an_error() {
        let app_arguments = parse(&["--colour", "1,2,3"]);

        assert!(app_arguments
            .read_error
            .unwrap()
            .starts_with("Unknown argument: --colour"));
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let app_arguments = parse(&["--hex"]);

        assert!(app_arguments
            .read_error
            .unwrap()
            .starts_with("Not enough arguments for --hex"));
    }

    #[test]
    fn test_flag_without_value_can_be_last() {
        let app_arguments = parse(&["--hex", "1,2,3", "--reject-out-of-range"]);

        assert_eq!(app_arguments.read_error, None);
        assert!(app_arguments.reject_out_of_range);
    }

    #[test]
    fn test_two_actions_are_an_error() {
        let app_arguments = parse(&["--hex", "1,2,3", "--color", "1,2,3"]);

        assert!(app_arguments.read_error.is_some());
    }

    #[test]
    fn test_no_action_is_an_error() {
        assert!(parse(&[]).read_error.is_some());
        assert!(parse(&["--layout", "fixed"]).read_error.is_some());
    }

    #[test]
    fn test_unknown_layout_is_an_error() {
        let app_arguments = parse(&["--swatch", "t", "--layout", "grid"]);

        assert!(app_arguments
            .read_error
            .unwrap()
            .starts_with("Unknown layout: grid"));
    }

    #[test]
    fn test_swatch_colors_require_swatch() {
        assert!(parse(&["--hex", "1,2,3", "--rgb", "1,2,3"]).read_error.is_some());
        assert!(parse(&["--swatch", "t", "--rgb", "1,2,3", "--colors-file", "a.txt"])
            .read_error
            .is_some());
    }

    #[test]
    fn test_arguments_without_errors_always_have_an_action() {
        let cases: [&[&str]; 4] = [
            &["--hex", "1,2,3"],
            &["--reject-out-of-range", "--color", "#102030"],
            &["--layout", "fixed", "--swatch", "t"],
            &["--config-path", "c.json", "--convert", "colors.txt"],
        ];

        for case in cases {
            let app_arguments = parse(case);
            assert_eq!(app_arguments.read_error, None);
            assert!(app_arguments.action.is_some());
        }
    }
}
