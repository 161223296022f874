#[cfg(test)]
mod utils;
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use rpnex::{
    build, eval_tree, evaluate, is_numeral, parse, tokenize, tokenize_and_convert, Calculator,
    Capacity, ErrorKind, ExResult, NodeRef, Postfix,
};
use std::fs::{self, File};
use std::io::{self, BufRead};
use std::thread;
use utils::{assert_float_eq_f32, assert_float_eq_f64, assert_same_float};

fn random_digits(rng: &mut StdRng, n: usize) -> String {
    (0..n)
        .map(|_| char::from(b'0' + rng.gen_range(0..10)))
        .collect()
}

fn random_numeral(rng: &mut StdRng) -> String {
    let n_int = rng.gen_range(1..4);
    let int = random_digits(rng, n_int);
    match rng.gen_range(0..4) {
        0 => format!("{}.{}", int, random_digits(rng, 2)),
        1 => format!("{}.", int),
        2 => format!(".{}", int),
        _ => int,
    }
}

fn random_expr(rng: &mut StdRng, depth: usize) -> String {
    if depth == 0 || rng.gen_bool(0.25) {
        return random_numeral(rng);
    }
    let op = ["+", "-", "*", "/", "^"][rng.gen_range(0..5)];
    let left = random_expr(rng, depth - 1);
    let right = random_expr(rng, depth - 1);
    if rng.gen_bool(0.5) {
        format!("({} {} {})", left, op, right)
    } else {
        format!("{}{}{}", left, op, right)
    }
}

fn random_exprs(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| random_expr(&mut rng, 4)).collect()
}

#[test]
fn test_version() {
    // make sure the version strings in the Cargo.toml and lib.rs coincide
    let file = File::open("src/lib.rs").unwrap();
    let version_line_lib = io::BufReader::new(file)
        .lines()
        .find(|line| line.as_ref().unwrap().contains("html_root_url"))
        .unwrap()
        .unwrap();
    let re_version = Regex::new(r#"[0-9]{1,4}\.[0-9]{1,4}\.[0-9]{1,4}"#).unwrap();
    let match_lib = re_version.find(&version_line_lib).unwrap().as_str();

    let toml_string = fs::read_to_string("Cargo.toml").unwrap();
    let cargo_toml: toml::Value = toml::from_str(&toml_string).unwrap();
    let package = cargo_toml.get("package").unwrap().as_table().unwrap();
    let version = package.get("version").unwrap().as_str().unwrap();
    assert_eq!(match_lib, version);
}

#[test]
fn test_numerals_are_single_tokens() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let numeral = random_numeral(&mut rng);
        assert!(is_numeral(&numeral));
        let tokens = tokenize(&numeral).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].as_str(), numeral);
    }
}

#[test]
fn test_evaluate() -> ExResult<()> {
    fn test(sut: &str, reference: f32) -> ExResult<()> {
        println!("testing {}...", sut);
        assert_float_eq_f32(evaluate(sut)?, reference);
        assert_float_eq_f32(eval_tree(&parse(sut)?)?, reference);
        Ok(())
    }
    test("3 + 4", 7.0)?;
    test("3 + 4 * 2", 11.0)?;
    test("(3 + 4) * 2", 14.0)?;
    // right-associative exponentiation would give 512
    test("2 ^ 3 ^ 2", 64.0)?;
    test("2 ^ (3 ^ 2)", 512.0)?;
    test("10 - 4 - 3", 3.0)?;
    test("64 / 4 / 2", 8.0)?;
    test("1.5*4", 6.0)?;
    test(".5 + 5.", 5.5)?;
    test("2 ^ .5", 2f32.sqrt())?;
    test("((((7))))", 7.0)?;
    test("3 + 4 * 2 / (1 - 5) ^ 2 ^ 3", 3.0 + 8.0 / 4096.0)?;
    test("1,+,2", 3.0)?;
    test("1\t+\r2", 3.0)?;
    Ok(())
}

#[test]
fn test_ieee_semantics() {
    assert_eq!(evaluate("10 / 0").unwrap(), f32::INFINITY);
    assert_eq!(evaluate("0 - 10 / 0").unwrap(), f32::NEG_INFINITY);
    assert!(evaluate("0 / 0").unwrap().is_nan());
    assert!(evaluate("10 ^ 100").unwrap().is_infinite());
}

#[test]
fn test_postfix() -> ExResult<()> {
    assert_eq!(tokenize_and_convert("3 + 4 * 2")?.to_string(), "3 4 2 * +");
    assert_eq!(tokenize_and_convert("(3 + 4) * 2")?.to_string(), "3 4 + 2 *");
    let postfix = Postfix::from_symbols("1 2 3 + -")?;
    assert_eq!(build(&postfix)?.to_string(), "(1 - (2 + 3))");
    Ok(())
}

#[test]
fn test_errors() {
    fn test(sut: &str, kind: ErrorKind) {
        let parsed = parse(sut);
        let evaluated = evaluate(sut);
        println!("{} -> {:?} / {:?}", sut, parsed, evaluated);
        assert_eq!(parsed.unwrap_err().kind(), kind);
        assert_eq!(evaluated.unwrap_err().kind(), kind);
    }
    test(")1 + 2", ErrorKind::UnmatchedParenthesis);
    test("(1 + 2", ErrorKind::UnmatchedParenthesis);
    test("(1 + 2))", ErrorKind::UnmatchedParenthesis);
    test(&"1".repeat(65), ErrorKind::TokenTooLong);
    test(&vec!["1"; 40].join("+"), ErrorKind::TooManyTokens);
    test("5*ϰ", ErrorKind::NonAscii);
    test("", ErrorKind::MalformedExpression);
    test("1 2", ErrorKind::MalformedExpression);

    // an operator without enough operands
    assert_eq!(
        parse("1 + * 2").unwrap_err().kind(),
        ErrorKind::MalformedExpression
    );
    assert_eq!(
        evaluate("1 + * 2").unwrap_err().kind(),
        ErrorKind::StackUnderflow
    );
    assert_eq!(evaluate("+").unwrap_err().kind(), ErrorKind::StackUnderflow);
    // words that are neither numerals nor operators
    assert_eq!(
        evaluate("x + 1").unwrap_err().kind(),
        ErrorKind::UnknownOperator
    );
    assert_eq!(
        evaluate("1.2.3 + 1").unwrap_err().kind(),
        ErrorKind::InvalidNumber
    );
}

fn prefix_shape(reversed: &[&str], pos: &mut usize) -> String {
    let symbol = reversed[*pos];
    *pos += 1;
    if is_numeral(symbol) {
        symbol.to_string()
    } else {
        let first = prefix_shape(reversed, pos);
        let second = prefix_shape(reversed, pos);
        format!("[{} {} {}]", symbol, first, second)
    }
}

fn slot_shape(node: NodeRef) -> String {
    if node.has_children() {
        format!(
            "[{} {} {}]",
            node.value(),
            slot_shape(node.child(0).unwrap()),
            slot_shape(node.child(1).unwrap())
        )
    } else {
        node.value().to_string()
    }
}

#[test]
fn test_tree_shape_of_reversed_prefix_walk() -> ExResult<()> {
    for sut in random_exprs(300) {
        let postfix = tokenize_and_convert(&sut)?;
        let reversed = postfix.iter().rev().map(|t| t.as_str()).collect_vec();
        let mut pos = 0;
        let reference = prefix_shape(&reversed, &mut pos);
        assert_eq!(pos, reversed.len());
        let tree = parse(&sut)?;
        assert_eq!(slot_shape(tree.root()), reference);
        assert_eq!(tree.len(), postfix.len());
        assert_eq!(tree.to_postfix(), postfix);
    }
    Ok(())
}

#[test]
fn test_tree_eval_equals_postfix_eval() -> ExResult<()> {
    for sut in random_exprs(300) {
        let tree = parse(&sut)?;
        assert_same_float(eval_tree(&tree)?, evaluate(&sut)?, &sut);
        // the displayed tree is a fully parenthesized equivalent
        assert_same_float(evaluate(&tree.to_string())?, evaluate(&sut)?, &sut);
    }
    Ok(())
}

#[test]
fn test_idempotence_and_threads() -> ExResult<()> {
    let exprs = random_exprs(100);
    let reference = exprs
        .iter()
        .map(|sut| evaluate(sut))
        .collect::<ExResult<Vec<_>>>()?;
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (sut, &value) in exprs.iter().zip(reference.iter()) {
                    assert_same_float(evaluate(sut).unwrap(), value, sut);
                }
            });
        }
    });
    Ok(())
}

#[test]
fn test_calculator_f64() -> ExResult<()> {
    let calc = Calculator::<f64>::with_capacity(Capacity {
        max_tokens: 4096,
        max_token_len: 16,
    });
    let n = 1000;
    let sum = vec!["0.5"; n].join(" + ");
    assert_float_eq_f64(calc.evaluate(&sum)?, n as f64 * 0.5);
    let tree = calc.parse(&sum)?;
    assert_eq!(tree.len(), 2 * n - 1);
    assert_float_eq_f64(calc.eval_tree(&tree)?, n as f64 * 0.5);
    assert_eq!(
        calc.evaluate("12345678901234567").unwrap_err().kind(),
        ErrorKind::TokenTooLong
    );
    Ok(())
}

#[test]
fn test_deep_tree() -> ExResult<()> {
    let calc = Calculator::<f64>::with_capacity(Capacity {
        max_tokens: 1_000_000,
        max_token_len: 16,
    });
    let n = 200_000;
    let sum = vec!["1"; n].join("+");
    assert_float_eq_f64(calc.evaluate(&sum)?, n as f64);

    let tree = calc.parse(&sum)?;
    assert_eq!(tree.depth(), n);
    assert_float_eq_f64(calc.eval_tree(&tree)?, n as f64);
    let postfix = tree.to_postfix();
    assert_eq!(postfix.len(), 2 * n - 1);
    assert_eq!(calc.build(&postfix)?, tree);
    let displayed = tree.to_string();
    assert!(displayed.starts_with(&"(".repeat(n - 1)));
    assert!(displayed.ends_with(") + 1)"));

    // right-deep
    let nested = format!("{}1{}", "(1 - ".repeat(n / 2), ")".repeat(n / 2));
    let tree = calc.parse(&nested)?;
    assert_eq!(tree.depth(), n / 2 + 1);
    assert_float_eq_f64(calc.eval_tree(&tree)?, calc.evaluate(&nested)?);
    Ok(())
}
