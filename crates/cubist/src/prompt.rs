use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

/// Ask for the image width on `output` and read one line from `input`.
pub fn read_width<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u32> {
    write!(output, "IMAGE WIDTH: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no image width given");
    }

    let text = line.trim();
    text.parse()
        .with_context(|| format!("invalid image width '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_width() {
        let mut input = Cursor::new("  400 \n");
        let mut output = Vec::new();

        assert_eq!(read_width(&mut input, &mut output).unwrap(), 400);
        assert_eq!(output, b"IMAGE WIDTH: ");
    }

    #[test]
    fn test_rejects_garbage() {
        let mut input = Cursor::new("wide\n");
        let err = read_width(&mut input, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("invalid image width 'wide'"));
    }

    #[test]
    fn test_rejects_empty_input() {
        let mut input = Cursor::new("");
        assert!(read_width(&mut input, &mut Vec::new()).is_err());
    }
}
