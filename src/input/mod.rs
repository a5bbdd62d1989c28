mod reader;

pub use reader::{InputSource, Line, LineEnding, LineReader, MAX_LINE_LENGTH};
