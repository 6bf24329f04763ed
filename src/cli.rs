/// eng
/// Command line: `porokit calc|parse|convert <PATH>`. A directory is processed file by file,
/// a file that fails is reported and the rest of the batch goes on.
pub mod cli_main;
pub mod tasks;
