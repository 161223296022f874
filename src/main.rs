use rpnex::{evaluate, parse, tokenize_and_convert};
use std::io::{self, BufRead, Write};

fn process(line: &str) -> Result<String, rpnex::ExError> {
    let (command, expr) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match command {
        ":rpn" => Ok(tokenize_and_convert(expr)?.to_string()),
        ":tree" => Ok(parse(expr)?.to_string()),
        _ => Ok(format!("{:?}", evaluate(line)?)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    let mut stdout = io::stdout();
    let mut stdin = io::stdin().lock();
    loop {
        stdout.write_all("> ".as_bytes())?;
        stdout.flush()?;
        buffer.clear();
        if stdin.read_line(&mut buffer)? == 0 {
            break;
        }
        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }
        match process(line) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Error {e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::process;
    use rpnex::ErrorKind;

    #[test]
    fn test_process() {
        assert_eq!(process("3 + 4 * 2").unwrap(), "11.0");
        assert_eq!(process(":rpn 3 + 4 * 2").unwrap(), "3 4 2 * +");
        assert_eq!(process(":tree\t2 ^ 3 ^ 2").unwrap(), "((2 ^ 3) ^ 2)");
        assert_eq!(process(":rpn").unwrap(), "");
        assert_eq!(
            process(":tree").unwrap_err().kind(),
            ErrorKind::MalformedExpression
        );
        // commands are whole words
        assert_eq!(
            process(":rpnx 1 + 2").unwrap_err().kind(),
            ErrorKind::UnknownOperator
        );
        assert_eq!(
            process(":tree1 + 2").unwrap_err().kind(),
            ErrorKind::UnknownOperator
        );
    }
}
