//! # Command Parsing
//!
//! Turns one line of operator input into a [`Command`].
//!
//! ## Grammar
//! ```text
//! add <name>;<category>;<price>;<vat%>;<code>;<units>;<threshold> [| <next product> ...]
//! remove <name>
//! find <name>
//! restock <name>;<units>
//! sell <name>:<units>[, <name>:<units> ...]
//! update <name>;<field>;<value>      field: name|category|code|price|vat|threshold
//! stock [json]  |  profit [json]  |  list [json]
//! help  |  quit
//! ```
//!
//! Prices and VAT are decimal text with at most two fractional digits
//! ("10", "10.5", "10.50"), parsed straight into cents / basis points.
//! Range rules (price > 0, units > 0, ...) are left to the core.

use stockbook_core::{Money, ProductField, SaleRequest, TaxRate};
use thiserror::Error;

/// Input that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown field '{0}' (name, category, code, price, vat, threshold)")]
    UnknownField(String),
}

/// How a report should be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Raw product fields from an `add` line, before core validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub vat: TaxRate,
    pub code: String,
    pub units: i64,
    pub minimum_threshold: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<ProductDraft>),
    Remove(String),
    Find(String),
    Restock { name: String, units: i64 },
    Sell(Vec<SaleRequest>),
    Update { name: String, field: ProductField },
    Stock(OutputFormat),
    Profit(OutputFormat),
    List(OutputFormat),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <name>;<category>;<price>;<vat%>;<code>;<units>;<threshold> [| ...]
  remove <name>
  find <name>
  restock <name>;<units>
  sell <name>:<units>[, <name>:<units> ...]
  update <name>;<name|category|code|price|vat|threshold>;<value>
  stock [json]      stock levels and restock warnings
  profit [json]     profit per product
  list [json]       full product listing
  help
  quit";

const ADD_USAGE: &str = "add <name>;<category>;<price>;<vat%>;<code>;<units>;<threshold>";
const RESTOCK_USAGE: &str = "restock <name>;<units>";
const SELL_USAGE: &str = "sell <name>:<units>[, <name>:<units> ...]";
const UPDATE_USAGE: &str = "update <name>;<field>;<value>";

/// Parses one input line.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword.to_lowercase().as_str() {
        "add" | "register" => parse_add(rest),
        "remove" | "rm" => required_name(rest, "remove <name>").map(Command::Remove),
        "find" | "search" => required_name(rest, "find <name>").map(Command::Find),
        "restock" => parse_restock(rest),
        "sell" => parse_sell(rest),
        "update" => parse_update(rest),
        "stock" | "report" => parse_format(rest).map(Command::Stock),
        "profit" | "sales" => parse_format(rest).map(Command::Profit),
        "list" | "listing" => parse_format(rest).map(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn required_name(rest: &str, usage: &'static str) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    Ok(rest.to_string())
}

fn parse_add(rest: &str) -> Result<Command, ParseError> {
    let drafts = rest
        .split('|')
        .map(parse_draft)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Command::Add(drafts))
}

fn parse_draft(text: &str) -> Result<ProductDraft, ParseError> {
    let parts: Vec<&str> = text.split(';').map(str::trim).collect();
    let [name, category, price, vat, code, units, threshold] = parts[..] else {
        return Err(ParseError::Usage(ADD_USAGE));
    };

    Ok(ProductDraft {
        name: name.to_string(),
        category: category.to_string(),
        price: parse_money(price, "price")?,
        vat: parse_vat(vat)?,
        code: code.to_string(),
        units: parse_int(units, "units")?,
        minimum_threshold: parse_int(threshold, "threshold")?,
    })
}

fn parse_restock(rest: &str) -> Result<Command, ParseError> {
    let (name, units) = rest.rsplit_once(';').ok_or(ParseError::Usage(RESTOCK_USAGE))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::Usage(RESTOCK_USAGE));
    }

    Ok(Command::Restock {
        name: name.to_string(),
        units: parse_int(units, "units")?,
    })
}

fn parse_sell(rest: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::Usage(SELL_USAGE));
    }

    let requests = rest
        .split(',')
        .map(|item| {
            let (name, units) = item.rsplit_once(':').ok_or(ParseError::Usage(SELL_USAGE))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ParseError::Usage(SELL_USAGE));
            }
            Ok(SaleRequest::new(name, parse_int(units, "units")?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Command::Sell(requests))
}

fn parse_update(rest: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = rest.splitn(3, ';').map(str::trim).collect();
    let [name, field, value] = parts[..] else {
        return Err(ParseError::Usage(UPDATE_USAGE));
    };
    if name.is_empty() {
        return Err(ParseError::Usage(UPDATE_USAGE));
    }

    let field = match field.to_lowercase().as_str() {
        "name" => ProductField::Name(value.to_string()),
        "category" => ProductField::Category(value.to_string()),
        "code" => ProductField::Code(value.to_string()),
        "price" => ProductField::Price(parse_money(value, "price")?),
        "vat" => ProductField::Vat(parse_vat(value)?),
        "threshold" => ProductField::MinimumThreshold(parse_int(value, "threshold")?),
        other => return Err(ParseError::UnknownField(other.to_string())),
    };

    Ok(Command::Update {
        name: name.to_string(),
        field,
    })
}

fn parse_format(rest: &str) -> Result<OutputFormat, ParseError> {
    match rest.to_lowercase().as_str() {
        "" | "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(ParseError::Usage("<report> [json]")),
    }
}

fn parse_int(text: &str, field: &'static str) -> Result<i64, ParseError> {
    let text = text.trim();
    text.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// Parses decimal text into hundredths: "10.5" → 1050, "-3" → -300.
fn parse_hundredths(text: &str, field: &'static str) -> Result<i64, ParseError> {
    let text = text.trim();
    let invalid = || ParseError::InvalidNumber {
        field,
        value: text.to_string(),
    };

    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    let value = whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(invalid)?;
    Ok(if negative { -value } else { value })
}

fn parse_money(text: &str, field: &'static str) -> Result<Money, ParseError> {
    parse_hundredths(text, field).map(Money::from_cents)
}

fn parse_vat(text: &str) -> Result<TaxRate, ParseError> {
    let bps = parse_hundredths(text, "vat")?;
    u32::try_from(bps)
        .map(TaxRate::from_bps)
        .map_err(|_| ParseError::InvalidNumber {
            field: "vat",
            value: text.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_single_and_batch() {
        let cmd = parse("add Widget;tools;10;10;W-1;5;2").unwrap();
        let Command::Add(drafts) = cmd else {
            panic!("expected add");
        };
        assert_eq!(
            drafts,
            vec![ProductDraft {
                name: "Widget".into(),
                category: "tools".into(),
                price: Money::from_cents(1000),
                vat: TaxRate::from_bps(1000),
                code: "W-1".into(),
                units: 5,
                minimum_threshold: 2,
            }]
        );

        let Command::Add(drafts) =
            parse("ADD Widget;tools;10;10;W-1;5;2 | Gadget;toys;2.5;0;G-1;10;1").unwrap()
        else {
            panic!("expected add");
        };
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].price, Money::from_cents(250));
    }

    #[test]
    fn test_parse_add_errors() {
        assert_eq!(
            parse("add Widget;tools;10"),
            Err(ParseError::Usage(ADD_USAGE))
        );
        assert!(matches!(
            parse("add Widget;tools;ten;10;W-1;5;2"),
            Err(ParseError::InvalidNumber { field: "price", .. })
        ));
        assert!(matches!(
            parse("add Widget;tools;10;-5;W-1;5;2"),
            Err(ParseError::InvalidNumber { field: "vat", .. })
        ));
    }

    #[test]
    fn test_parse_sell() {
        assert_eq!(
            parse("sell Widget:3, Gadget : 1").unwrap(),
            Command::Sell(vec![
                SaleRequest::new("Widget", 3),
                SaleRequest::new("Gadget", 1),
            ])
        );
        assert_eq!(parse("sell"), Err(ParseError::Usage(SELL_USAGE)));
        assert_eq!(parse("sell Widget"), Err(ParseError::Usage(SELL_USAGE)));
        // Range checks belong to the core
        assert_eq!(
            parse("sell Widget:-1").unwrap(),
            Command::Sell(vec![SaleRequest::new("Widget", -1)])
        );
    }

    #[test]
    fn test_parse_restock_remove_find() {
        assert_eq!(
            parse("restock Big Widget;4").unwrap(),
            Command::Restock {
                name: "Big Widget".into(),
                units: 4
            }
        );
        assert_eq!(parse("restock ;4"), Err(ParseError::Usage(RESTOCK_USAGE)));
        assert_eq!(
            parse("remove Big Widget").unwrap(),
            Command::Remove("Big Widget".into())
        );
        assert_eq!(parse("find").unwrap_err(), ParseError::Usage("find <name>"));
    }

    #[test]
    fn test_parse_update() {
        assert_eq!(
            parse("update Widget;price;12.5").unwrap(),
            Command::Update {
                name: "Widget".into(),
                field: ProductField::Price(Money::from_cents(1250)),
            }
        );
        assert_eq!(
            parse("update Widget;name;Big; Widget").unwrap(),
            Command::Update {
                name: "Widget".into(),
                field: ProductField::Name("Big; Widget".into()),
            }
        );
        assert_eq!(
            parse("update Widget;colour;red"),
            Err(ParseError::UnknownField("colour".into()))
        );
    }

    #[test]
    fn test_parse_reports() {
        assert_eq!(parse("stock").unwrap(), Command::Stock(OutputFormat::Text));
        assert_eq!(
            parse("profit json").unwrap(),
            Command::Profit(OutputFormat::Json)
        );
        assert_eq!(parse("list").unwrap(), Command::List(OutputFormat::Text));
        assert!(parse("list xml").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("help").unwrap(), Command::Help);
        assert_eq!(parse("exit").unwrap(), Command::Quit);
        assert_eq!(
            parse("fly away"),
            Err(ParseError::UnknownCommand("fly".into()))
        );
    }

    #[test]
    fn test_parse_hundredths() {
        assert_eq!(parse_hundredths("10", "x"), Ok(1000));
        assert_eq!(parse_hundredths("10.5", "x"), Ok(1050));
        assert_eq!(parse_hundredths("0.05", "x"), Ok(5));
        assert_eq!(parse_hundredths("-3", "x"), Ok(-300));
        assert!(parse_hundredths("1.234", "x").is_err());
        assert!(parse_hundredths(".5", "x").is_err());
        assert!(parse_hundredths("1e3", "x").is_err());
        assert!(parse_hundredths("99999999999999999999", "x").is_err());
    }
}
