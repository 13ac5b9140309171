use crate::{
    ast::{
        expr::{Expression, ExpressionKind},
        literal::Literal,
        operator::{BinaryOperator, UnaryOperator},
        span::Span,
    },
    errors::BuildError,
    parser::{FilterParser, Rule},
};
use pest::{Parser, error::LineColLocation, iterators::Pair};

pub type BuildResult<T> = Result<T, BuildError>;

/// Deepest `(`/`[` nesting accepted in source text. The parser and builder
/// recurse once per level, so this bounds their stack use.
pub const MAX_NESTING: usize = 64;

/// Deepest tree accepted from the builder. Operator and member chains nest
/// without brackets, so the tree is bounded separately.
pub const MAX_TREE_DEPTH: usize = 128;

/// Parse filter expression text into an untyped AST
pub fn parse(input: &str) -> BuildResult<Expression> {
    check_nesting(input)?;
    let mut pairs = FilterParser::parse(Rule::program, input).map_err(syntax_error)?;
    let program = pairs.next().ok_or_else(|| BuildError {
        message: "Empty input".to_string(),
        line: 1,
        column: 1,
    })?;

    let span = pair_to_span(&program);
    let expression = program
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expression)
        .ok_or_else(|| BuildError::at(span, "Empty input"))?;

    build_expression(expression)
}

/// Scan for bracket nesting ahead of the parser. Quoted literals and line
/// comments are skipped; unbalanced input is left for the parser to report.
fn check_nesting(input: &str) -> BuildResult<()> {
    let mut depth = 0usize;
    let mut line = 1;
    let mut column = 0;
    let mut quote: Option<(char, bool)> = None;
    let mut previous = None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        column += 1;
        if c == '\n' {
            line += 1;
            column = 0;
        }

        if let Some((delimiter, raw)) = quote {
            if c == '\\' && !raw {
                chars.next();
                column += 1;
            } else if c == delimiter || c == '\n' {
                quote = None;
            }
            previous = Some(c);
            continue;
        }

        match c {
            '"' | '\'' => quote = Some((c, matches!(previous, Some('r' | 'R')))),
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            '(' | '[' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(BuildError {
                        message: format!("Expression nesting exceeds {} levels", MAX_NESTING),
                        line,
                        column,
                    });
                }
            }
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        previous = Some(c);
    }
    Ok(())
}

/// Build a composite node, rejecting trees past [`MAX_TREE_DEPTH`].
fn nested(kind: ExpressionKind, span: Span) -> BuildResult<Expression> {
    let expr = Expression::new(kind, span);
    if expr.depth > MAX_TREE_DEPTH {
        return Err(BuildError::at(
            span,
            format!("Expression nesting exceeds {} levels", MAX_TREE_DEPTH),
        ));
    }
    Ok(expr)
}

fn syntax_error(err: pest::error::Error<Rule>) -> BuildError {
    let (line, column) = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    BuildError {
        message: err.variant.message().to_string(),
        line,
        column,
    }
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, col) = pair.line_col();
    let span_pest = pair.as_span();
    Span::new(span_pest.start(), span_pest.end(), line, col)
}

fn build_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    match pair.as_rule() {
        Rule::expression => {
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| BuildError::at(span, "Empty expression"))?;
            build_expression(inner)
        }
        Rule::logical_or => build_logical_chain(pair, BinaryOperator::Or),
        Rule::logical_and => build_logical_chain(pair, BinaryOperator::And),
        Rule::relation | Rule::addition | Rule::multiplication => build_binary_expression(pair),
        Rule::unary => build_unary_expression(pair),
        Rule::member => build_member_expression(pair),
        _ => build_primary_expression(pair),
    }
}

/// `a && b && c && d` becomes `(a && b) && (c && d)` rather than a
/// left-leaning chain, which keeps nesting logarithmic in the term count.
fn build_logical_chain(pair: Pair<Rule>, operator: BinaryOperator) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut terms = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::op_and | Rule::op_or => {}
            _ => terms.push(build_expression(inner)?),
        }
    }

    if terms.is_empty() {
        return Err(BuildError::at(span, format!("Missing operands for '{}'", operator)));
    }
    let chain = balance(terms, operator);
    if chain.depth > MAX_TREE_DEPTH {
        return Err(BuildError::at(
            span,
            format!("Expression nesting exceeds {} levels", MAX_TREE_DEPTH),
        ));
    }
    Ok(chain)
}

fn balance(mut terms: Vec<Expression>, operator: BinaryOperator) -> Expression {
    if terms.len() == 1 {
        if let Some(term) = terms.pop() {
            return term;
        }
    }

    let split = (terms.len() - 1) / 2 + 1;
    let right_terms = terms.split_off(split);
    let left = balance(terms, operator);
    let right = balance(right_terms, operator);
    let span = left.span.merge(right.span);

    Expression::new(
        ExpressionKind::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        },
        span,
    )
}

fn build_binary_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| BuildError::at(span, "Missing left operand"))?;
    let mut left = build_expression(first)?;

    while let Some(op_pair) = inner.next() {
        let op_span = pair_to_span(&op_pair);
        let operator = binary_operator(&op_pair)?;
        let right_pair = inner.next().ok_or_else(|| {
            BuildError::at(op_span, format!("Missing operand after '{}'", operator))
        })?;
        let right = build_expression(right_pair)?;
        let span = left.span.merge(right.span);

        left = nested(
            ExpressionKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            span,
        )?;
    }

    Ok(left)
}

fn binary_operator(pair: &Pair<Rule>) -> BuildResult<BinaryOperator> {
    let operator = match pair.as_rule() {
        Rule::op_eq => BinaryOperator::Equal,
        Rule::op_ne => BinaryOperator::NotEqual,
        Rule::op_lt => BinaryOperator::LessThan,
        Rule::op_le => BinaryOperator::LessOrEqual,
        Rule::op_gt => BinaryOperator::GreaterThan,
        Rule::op_ge => BinaryOperator::GreaterOrEqual,
        Rule::op_in => BinaryOperator::In,
        Rule::op_add => BinaryOperator::Add,
        Rule::op_sub => BinaryOperator::Subtract,
        Rule::op_mul => BinaryOperator::Multiply,
        Rule::op_div => BinaryOperator::Divide,
        Rule::op_mod => BinaryOperator::Modulo,
        _ => {
            return Err(BuildError::at(
                pair_to_span(pair),
                format!("Unknown operator: {}", pair.as_str()),
            ));
        }
    };
    Ok(operator)
}

/// Repeated prefix operators cancel in pairs: `!!a` is `a`, `--a` is `a`.
/// A single negation directly on a numeric literal folds into the literal.
fn build_unary_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut operators = Vec::new();
    let mut operand_pair = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::op_not => operators.push(UnaryOperator::Not),
            Rule::op_neg => operators.push(UnaryOperator::Negate),
            _ => operand_pair = Some(inner),
        }
    }

    let operand_pair = operand_pair.ok_or_else(|| BuildError::at(span, "Missing operand"))?;

    // Runs of identical operators, innermost first.
    let mut runs: Vec<(UnaryOperator, usize)> = Vec::new();
    for operator in operators.iter().rev() {
        match runs.last_mut() {
            Some((last, count)) if last == operator => *count += 1,
            _ => runs.push((*operator, 1)),
        }
    }

    let folded = if matches!(runs.first(), Some((UnaryOperator::Negate, count)) if count % 2 == 1)
    {
        negated_literal(&operand_pair, span)?
    } else {
        None
    };

    let mut remaining = &runs[..];
    let mut operand = match folded {
        Some(literal) => {
            remaining = &runs[1..];
            literal
        }
        None => build_expression(operand_pair)?,
    };

    for (operator, count) in remaining {
        if count % 2 == 0 {
            continue;
        }
        operand = nested(
            ExpressionKind::Unary {
                operator: *operator,
                operand: Box::new(operand),
            },
            span,
        )?;
    }

    Ok(operand)
}

fn negated_literal(member: &Pair<Rule>, span: Span) -> BuildResult<Option<Expression>> {
    let mut inner = member.clone().into_inner();
    let (Some(primary), None) = (inner.next(), inner.next()) else {
        return Ok(None);
    };

    let literal = match primary.as_rule() {
        Rule::lit_int => {
            let value = parse_int(primary.as_str(), true).ok_or_else(|| {
                BuildError::at(
                    span,
                    format!("Integer literal out of range: -{}", primary.as_str()),
                )
            })?;
            Literal::Int(value)
        }
        Rule::lit_double => Literal::Double(-parse_double(&primary)?),
        _ => return Ok(None),
    };

    Ok(Some(Expression::new(ExpressionKind::Literal(literal), span)))
}

fn build_member_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| BuildError::at(span, "Missing operand"))?;
    let mut expr = build_expression(first)?;

    for suffix in inner {
        let suffix_span = pair_to_span(&suffix);
        let span = expr.span.merge(suffix_span);
        match suffix.as_rule() {
            Rule::field_select => {
                let field = suffix
                    .into_inner()
                    .next()
                    .ok_or_else(|| BuildError::at(suffix_span, "Missing field name"))?
                    .as_str()
                    .to_string();
                expr = nested(
                    ExpressionKind::Select {
                        operand: Box::new(expr),
                        field,
                    },
                    span,
                )?;
            }
            Rule::member_call => {
                let mut parts = suffix.into_inner();
                let name = parts
                    .next()
                    .ok_or_else(|| BuildError::at(suffix_span, "Missing function name"))?
                    .as_str()
                    .to_string();
                let arguments = parts.map(build_expression).collect::<BuildResult<Vec<_>>>()?;
                expr = nested(
                    ExpressionKind::FunctionCall {
                        target: Some(Box::new(expr)),
                        name,
                        arguments,
                    },
                    span,
                )?;
            }
            rule => {
                return Err(BuildError::at(
                    suffix_span,
                    format!("Unexpected rule in member access: {:?}", rule),
                ));
            }
        }
    }

    Ok(expr)
}

fn build_primary_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let kind = match pair.as_rule() {
        Rule::ident => ExpressionKind::Identifier(pair.as_str().to_string()),
        Rule::global_call => {
            let mut parts = pair.into_inner();
            let name = parts
                .next()
                .ok_or_else(|| BuildError::at(span, "Missing function name"))?
                .as_str()
                .to_string();
            let arguments = parts.map(build_expression).collect::<BuildResult<Vec<_>>>()?;
            ExpressionKind::FunctionCall {
                target: None,
                name,
                arguments,
            }
        }
        Rule::list_literal => {
            let elements = pair
                .into_inner()
                .map(build_expression)
                .collect::<BuildResult<Vec<_>>>()?;
            ExpressionKind::List(elements)
        }
        _ => ExpressionKind::Literal(build_literal(&pair)?),
    };

    nested(kind, span)
}

fn build_literal(pair: &Pair<Rule>) -> BuildResult<Literal> {
    let span = pair_to_span(pair);
    let text = pair.as_str();
    let literal = match pair.as_rule() {
        Rule::lit_null => Literal::Null,
        Rule::lit_boolean => Literal::Boolean(text == "true"),
        Rule::lit_int => Literal::Int(parse_int(text, false).ok_or_else(|| {
            BuildError::at(span, format!("Integer literal out of range: {}", text))
        })?),
        Rule::lit_uint => Literal::Uint(parse_uint(text).ok_or_else(|| {
            BuildError::at(span, format!("Unsigned literal out of range: {}", text))
        })?),
        Rule::lit_double => Literal::Double(parse_double(pair)?),
        Rule::lit_string => {
            let bytes = decode_quoted(text, false).map_err(|msg| BuildError::at(span, msg))?;
            let value = String::from_utf8(bytes)
                .map_err(|_| BuildError::at(span, "String literal is not valid UTF-8"))?;
            Literal::String(value)
        }
        Rule::lit_bytes => {
            let bytes = decode_quoted(&text[1..], true).map_err(|msg| BuildError::at(span, msg))?;
            Literal::Bytes(bytes)
        }
        rule => {
            return Err(BuildError::at(
                span,
                format!("Unexpected rule in expression: {:?}", rule),
            ));
        }
    };
    Ok(literal)
}

fn split_radix(text: &str) -> (&str, u32) {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    }
}

fn parse_int(text: &str, negative: bool) -> Option<i64> {
    let (digits, radix) = split_radix(text);
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed, radix).ok()
}

fn parse_uint(text: &str) -> Option<u64> {
    let text = text.trim_end_matches(['u', 'U']);
    let (digits, radix) = split_radix(text);
    u64::from_str_radix(digits, radix).ok()
}

fn parse_double(pair: &Pair<Rule>) -> BuildResult<f64> {
    pair.as_str().parse::<f64>().map_err(|_| {
        BuildError::at(
            pair_to_span(pair),
            format!("Invalid double literal: {}", pair.as_str()),
        )
    })
}

/// Decode a quoted literal (with optional raw prefix) into bytes. In byte
/// mode `\xHH` yields a single byte; in string mode it yields the code point.
fn decode_quoted(text: &str, bytes: bool) -> Result<Vec<u8>, String> {
    let (raw, quoted) = match text.strip_prefix(['r', 'R']) {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if quoted.len() < 2 {
        return Err("Unterminated quoted literal".to_string());
    }
    let body = &quoted[1..quoted.len() - 1];
    if raw {
        return Ok(body.as_bytes().to_vec());
    }
    unescape(body, bytes)
}

fn unescape(body: &str, bytes: bool) -> Result<Vec<u8>, String> {
    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut out, c);
            continue;
        }

        let escaped = chars.next().ok_or("Dangling escape at end of literal")?;
        match escaped {
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            '\'' => out.push(b'\''),
            '`' => out.push(b'`'),
            '?' => out.push(b'?'),
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            'x' | 'X' => {
                let code = hex_code(&mut chars, 2)?;
                if bytes {
                    out.push(code as u8);
                } else {
                    push_code_point(&mut out, code)?;
                }
            }
            'u' | 'U' => {
                if bytes {
                    return Err(format!("Escape '\\{}' is not allowed in bytes", escaped));
                }
                let width = if escaped == 'u' { 4 } else { 8 };
                let code = hex_code(&mut chars, width)?;
                push_code_point(&mut out, code)?;
            }
            other => return Err(format!("Invalid escape sequence '\\{}'", other)),
        }
    }

    Ok(out)
}

fn hex_code(chars: &mut std::str::Chars<'_>, width: usize) -> Result<u32, String> {
    let digits: String = chars.by_ref().take(width).collect();
    if digits.chars().count() != width {
        return Err(format!("Escape needs {} hex digits", width));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| format!("Invalid hex escape '{}'", digits))
}

fn push_code_point(out: &mut Vec<u8>, code: u32) -> Result<(), String> {
    let c = char::from_u32(code).ok_or_else(|| format!("Invalid code point {:#x}", code))?;
    push_char(out, c);
    Ok(())
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
