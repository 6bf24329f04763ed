/// eng
/// Reading the text exports of the instrument. TriStar II writes them in UTF-16LE, the files of older
/// versions of the software are in the ANSI code page and may be converted once with `convert_to_utf16le`.
/// Also contains helpers to list the input files of a folder and to name the output workbooks.
pub mod load_from_file;
