//! Table-style macros for the command test files.
//!
//! Each invocation lists several cases, one test function per case.

/// Parse `dbfs <argv>` and check fields of the resulting subcommand.
///
/// ```ignore
/// crate::parses_to! {
///     test_defaults: ["cat", "/t/c/v"] => Cat { offset: 0, length: None },
///     test_with_offset: ["cat", "/t/c/v", "--offset", "6"] => Cat { offset: 6 },
/// }
/// ```
#[macro_export]
macro_rules! parses_to {
    ($(
        $test_name:ident : [$($arg:literal),* $(,)?] => $variant:ident {
            $($field:ident : $expected:expr),* $(,)?
        }
    ),* $(,)?) => {$(
        #[rstest::rstest]
        fn $test_name() {
            use clap::Parser;
            let args = $crate::cli::Args::try_parse_from(["dbfs", $($arg),*])
                .unwrap_or_else(|e| panic!("{} should parse: {}", stringify!($($arg)*), e));
            let $crate::commands::Command::$variant(cmd) = args.command else {
                panic!("{} parsed to another subcommand", stringify!($($arg)*));
            };
            $(assert_eq!(cmd.$field, $expected, "field `{}`", stringify!($field));)*
        }
    )*};
}

/// Check that `dbfs <argv>` is rejected, optionally naming what the error must mention.
///
/// ```ignore
/// crate::rejects_args! {
///     test_requires_path: ["stat"] mentioning "<PATH>",
///     test_rejects_two_paths: ["ls", "/a", "/b"],
/// }
/// ```
#[macro_export]
macro_rules! rejects_args {
    ($(
        $test_name:ident : [$($arg:literal),* $(,)?] $(mentioning $needle:literal)?
    ),* $(,)?) => {$(
        #[rstest::rstest]
        fn $test_name() {
            use clap::Parser;
            let Err(err) = $crate::cli::Args::try_parse_from(["dbfs", $($arg),*]) else {
                panic!("{} should not parse", stringify!($($arg)*));
            };
            #[allow(unused_variables)]
            let message = err.to_string();
            $(assert!(message.contains($needle), "error should mention {}: {}", $needle, message);)?
        }
    )*};
}

/// Render a fixture in one output format and compare the text.
///
/// - `Json { "field": value, ... }` parses the output and compares fields
/// - `Format == expected` compares the whole output
/// - `Format ~ [needles]` requires each needle somewhere in the output
///
/// ```ignore
/// crate::renders!(test_to_table_root, root_result, Table == ROOT_TABLE);
/// crate::renders!(test_format_toon, root_result, Toon ~ ["path:", "notes"]);
/// ```
#[macro_export]
macro_rules! renders {
    ($test_name:ident, $fixture:ident, Json { $($field:literal : $expected:expr),* $(,)? }) => {
        #[rstest::rstest]
        fn $test_name() {
            use $crate::output::{OutputFormat, Outputable};
            let output = $fixture().format(OutputFormat::Json);
            let parsed: serde_json::Value = serde_json::from_str(&output)
                .unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, output));
            $(assert_eq!(parsed[$field], $expected, "JSON field `{}`", $field);)*
        }
    };
    ($test_name:ident, $fixture:ident, $format:ident == $expected:expr) => {
        #[rstest::rstest]
        fn $test_name() {
            use $crate::output::{OutputFormat, Outputable};
            assert_eq!($fixture().format(OutputFormat::$format), $expected);
        }
    };
    ($test_name:ident, $fixture:ident, $format:ident ~ [$($needle:expr),* $(,)?]) => {
        #[rstest::rstest]
        fn $test_name() {
            use $crate::output::{OutputFormat, Outputable};
            let output = $fixture().format(OutputFormat::$format);
            $(assert!(output.contains($needle), "{:?} missing from:\n{}", $needle, output);)*
        }
    };
}
