//! Positional/named flag tokenizer used by command handlers.

use term_types::flags::{FlagDefinition, FlagError, ParsedFlags};

/// Parse `tokens` against `definitions`.
///
/// A switch consumes the following token as its value. Tokens that match
/// no definition are skipped, so positional arguments may precede the
/// flags. A repeated switch keeps its last value.
pub fn parse_flags<S: AsRef<str>>(
    tokens: &[S],
    definitions: &[FlagDefinition],
) -> Result<ParsedFlags, FlagError> {
    let mut parsed = ParsedFlags::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_ref();
        let Some(def) = definitions.iter().find(|d| d.matches(token)) else {
            i += 1;
            continue;
        };

        let value = match tokens.get(i + 1).map(AsRef::as_ref) {
            Some(v) if !v.starts_with('-') => v,
            _ => {
                return Err(FlagError::MissingValue {
                    flag: token.to_string(),
                })
            }
        };

        let parsed_value = (def.parse)(value).map_err(|reason| FlagError::InvalidValue {
            flag: token.to_string(),
            value: value.to_string(),
            reason,
        })?;
        parsed.insert(def.key, parsed_value);
        i += 2;
    }

    if let Some(missing) = definitions
        .iter()
        .find(|d| d.required && !parsed.contains(d.key))
    {
        return Err(FlagError::MissingRequired {
            short: missing.short,
            long: missing.long,
        });
    }

    Ok(parsed)
}
