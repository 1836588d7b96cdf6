use label_selector::{ParseErrors, Requirement, Token};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use tabular::{Row, Table};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct ParsedSelector<'a> {
    selector: &'a str,
    requirements: &'a [Requirement],
}

pub fn render_requirements(
    selector: &str,
    requirements: &[Requirement],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let parsed = ParsedSelector {
        selector,
        requirements,
    };
    match format {
        OutputFormat::Table => {
            #[allow(clippy::literal_string_with_formatting_args)]
            let mut table = Table::new("{:<}  {:<}  {:<}")
                .with_row(Row::from_cells(["Key", "Operator", "Values"].iter().cloned()));
            for requirement in requirements {
                table.add_row(
                    Row::new()
                        .with_cell(requirement.key())
                        .with_cell(requirement.operator())
                        .with_cell(requirement.values().join(",")),
                );
            }
            Ok(format!("{}\n{}", selector, table))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&parsed)?),
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(&parsed)?),
    }
}

#[derive(Serialize)]
struct RejectedSelector<'a> {
    selector: &'a str,
    #[serde(flatten)]
    errors: &'a ParseErrors,
}

pub fn render_errors(
    selector: &str,
    errors: &ParseErrors,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let rejected = RejectedSelector { selector, errors };
    match format {
        OutputFormat::Table => {
            let mut out = format!("{}\n", selector);
            for message in errors.messages() {
                out.push_str(&format!("  error: {}\n", message));
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rejected)?),
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(&rejected)?),
    }
}

pub fn render_tokens(tokens: &[Token], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            #[allow(clippy::literal_string_with_formatting_args)]
            let mut table = Table::new("{:>}  {:<}  {:<}")
                .with_row(Row::from_cells(["Offset", "Kind", "Text"].iter().cloned()));
            for token in tokens {
                table.add_row(
                    Row::new()
                        .with_cell(token.offset)
                        .with_cell(token.kind)
                        .with_cell(format!("{:?}", token.text)),
                );
            }
            Ok(table.to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(tokens)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_selector::{parse, scan};

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json() {
        let requirements = parse("a=1,!b").unwrap();
        let out = render_requirements("a=1,!b", &requirements, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["selector"], "a=1,!b");
        assert_eq!(value["requirements"][0]["operator"], "equals");
        assert_eq!(value["requirements"][1]["key"], "b");
    }

    #[test]
    fn test_render_yaml() {
        let requirements = parse("tier in (web,api)").unwrap();
        let out = render_requirements("tier in (web,api)", &requirements, OutputFormat::Yaml)
            .unwrap();
        assert!(out.contains("operator: in"));
        assert!(out.contains("- web"));
    }

    #[test]
    fn test_render_table() {
        let requirements = parse("tier in (web,api)").unwrap();
        let out = render_requirements("tier in (web,api)", &requirements, OutputFormat::Table)
            .unwrap();
        assert!(out.starts_with("tier in (web,api)\n"));
        assert!(out.contains("Operator"));
        assert!(out.contains("web,api"));
    }

    #[test]
    fn test_render_errors_json() {
        let errors = parse("abc*").unwrap_err();
        let out = render_errors("abc*", &errors, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["selector"], "abc*");
        assert_eq!(value["errors"][0], "invalid label_selector: abc<<*>>");
    }

    #[test]
    fn test_render_tokens() {
        let out = render_tokens(&scan("a in (b)"), OutputFormat::Table).unwrap();
        assert!(out.contains("open_paren"));
        assert!(out.contains("\"in\""));
    }

    #[test]
    fn test_render_tokens_json() {
        let out = render_tokens(&scan("a!=b*"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[1]["kind"], "not_equal");
        assert_eq!(value[1]["text"], "!=");
        assert_eq!(value[1]["offset"], 1);
        assert_eq!(value[3]["kind"], "error");
        assert_eq!(value[3]["offset"], 4);
    }

    #[test]
    fn test_render_tokens_yaml() {
        let out = render_tokens(&scan("a"), OutputFormat::Yaml).unwrap();
        assert!(out.contains("kind: word"));
        assert!(out.contains("offset: 0"));
    }
}
