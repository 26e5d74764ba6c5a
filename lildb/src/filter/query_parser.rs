use super::{
    ComparisonFilter, ComparisonMode, EqualsFilter, Filter, InFilter, NotEqualsFilter, NotInFilter,
    NullFilter, OrFilter, RegexFilter, SizeFilter,
};
use crate::collection::Document;
use crate::common::{
    FieldPath, Value, OPERATOR_PREFIX, OP_AND, OP_GT, OP_GTE, OP_IN, OP_LT, OP_LTE, OP_NE, OP_NIN,
    OP_NOT, OP_NULL, OP_OR, OP_REGEX, OP_SIZE,
};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};

/// Converts query documents into [Filter] trees.
///
/// A query document maps field paths to literal values (equality tests) and operator
/// keys (`$or`, `$gte`, ...) to operator arguments. Sibling keys are combined with a
/// logical AND and an empty query matches every document.
///
/// In strict mode, the default, an unknown `$` key is rejected. In lenient mode it is
/// treated as a plain field path and compared for equality.
#[derive(Clone, Copy, Debug)]
pub struct QueryParser {
    strict: bool,
}

impl Default for QueryParser {
    fn default() -> Self {
        QueryParser { strict: true }
    }
}

impl QueryParser {
    pub fn new(strict: bool) -> Self {
        QueryParser { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parses a query value. Anything but a document is an invalid query.
    pub fn parse(&self, query: &Value) -> LilDbResult<Filter> {
        match query {
            Value::Document(doc) => self.parse_document(doc),
            _ => {
                log::error!("Invalid query {}, expected an object", query);
                Err(LilDbError::new(
                    "Invalid query. Must be an object.",
                    ErrorKind::InvalidQuery,
                ))
            }
        }
    }

    pub fn parse_document(&self, query: &Document) -> LilDbResult<Filter> {
        let mut filters = Vec::with_capacity(query.size());
        for (key, argument) in query.iter() {
            filters.push(self.parse_entry(key, argument)?);
        }
        Ok(Filter::all_of(filters))
    }

    fn parse_entry(&self, key: &str, argument: &Value) -> LilDbResult<Filter> {
        if !key.starts_with(OPERATOR_PREFIX) {
            if let Some(operators) = operator_document(argument) {
                return self.parse_field_operators(key, operators);
            }
            return Ok(Filter::Equals(EqualsFilter::new(
                FieldPath::parse(key),
                argument.clone(),
            )));
        }

        match key {
            OP_OR => Ok(Filter::Or(OrFilter::new(self.parse_list(key, argument)?))),
            OP_AND => Ok(Filter::all_of(self.parse_list(key, argument)?)),
            OP_NOT => Ok(self.parse(argument)?.not()),
            OP_LT => self.parse_comparison(key, argument, ComparisonMode::Lesser),
            OP_GT => self.parse_comparison(key, argument, ComparisonMode::Greater),
            OP_LTE => self.parse_comparison(key, argument, ComparisonMode::LesserEqual),
            OP_GTE => self.parse_comparison(key, argument, ComparisonMode::GreaterEqual),
            OP_NE => self.parse_fields(key, argument, |path, value| {
                Ok(Filter::NotEquals(NotEqualsFilter::new(path, value.clone())))
            }),
            OP_IN => {
                let filters = self.parse_in(key, argument)?;
                Ok(Filter::all_of(filters.into_iter().map(Filter::In).collect()))
            }
            OP_NIN => Ok(Filter::NotIn(NotInFilter::new(self.parse_in(key, argument)?))),
            OP_NULL => match argument {
                Value::String(path) => Ok(Filter::Null(NullFilter::new(FieldPath::parse(path)))),
                _ => {
                    log::error!("Invalid argument {} for {}", argument, key);
                    Err(LilDbError::new(
                        "Invalid query. $null must be a string (key).",
                        ErrorKind::InvalidQuery,
                    ))
                }
            },
            OP_SIZE => self.parse_fields(key, argument, |path, value| {
                Ok(Filter::Size(SizeFilter::new(path, value.clone())))
            }),
            OP_REGEX => self.parse_fields(key, argument, |path, value| match value {
                Value::String(pattern) => Ok(Filter::Regex(RegexFilter::new(path, pattern)?)),
                _ => {
                    log::error!("Invalid regex pattern {} for field {}", value, path);
                    Err(LilDbError::new(
                        "Invalid query. Every value of $regex must be a string.",
                        ErrorKind::InvalidQuery,
                    ))
                }
            }),
            _ if self.strict => {
                log::error!("Unknown query operator {}", key);
                Err(LilDbError::new(
                    &format!("Invalid query. Unknown operator {}.", key),
                    ErrorKind::InvalidQuery,
                ))
            }
            _ => {
                log::warn!("Unknown query operator {}, treating it as a field path", key);
                Ok(Filter::Equals(EqualsFilter::new(
                    FieldPath::parse(key),
                    argument.clone(),
                )))
            }
        }
    }

    /// Parses the field-first form `{"age": {"$gte": 18, "$lt": 65}}` by moving each
    /// operator to the top level with `path` as its only field.
    fn parse_field_operators(&self, path: &str, operators: &Document) -> LilDbResult<Filter> {
        let mut filters = Vec::with_capacity(operators.size());
        for (operator, operand) in operators.iter() {
            let filter = match operator.as_str() {
                OP_LT | OP_GT | OP_LTE | OP_GTE | OP_NE | OP_IN | OP_NIN | OP_SIZE | OP_REGEX => {
                    let mut fields = Document::new();
                    fields.put_field(path.to_string(), operand.clone());
                    self.parse_entry(operator, &Value::Document(fields))?
                }
                OP_NULL => match operand {
                    Value::Bool(true) => Filter::Null(NullFilter::new(FieldPath::parse(path))),
                    Value::Bool(false) => Filter::Null(NullFilter::new(FieldPath::parse(path))).not(),
                    _ => {
                        log::error!("Invalid argument {} for {} on field {}", operand, operator, path);
                        return Err(LilDbError::new(
                            &format!("Invalid query. {} on field {} must be a boolean.", operator, path),
                            ErrorKind::InvalidQuery,
                        ));
                    }
                },
                OP_NOT => match operator_document(operand) {
                    Some(negated) => self.parse_field_operators(path, negated)?.not(),
                    None => {
                        log::error!("Invalid argument {} for {} on field {}", operand, operator, path);
                        return Err(LilDbError::new(
                            &format!("Invalid query. {} on field {} must be an operator object.", operator, path),
                            ErrorKind::InvalidQuery,
                        ));
                    }
                },
                _ if self.strict => {
                    log::error!("Operator {} cannot be applied to field {}", operator, path);
                    return Err(LilDbError::new(
                        &format!("Invalid query. Unknown operator {} on field {}.", operator, path),
                        ErrorKind::InvalidQuery,
                    ));
                }
                _ => {
                    log::warn!("Unknown operator {} on field {}, comparing the whole object", operator, path);
                    return Ok(Filter::Equals(EqualsFilter::new(
                        FieldPath::parse(path),
                        Value::Document(operators.clone()),
                    )));
                }
            };
            filters.push(filter);
        }
        Ok(Filter::all_of(filters))
    }

    fn parse_list(&self, key: &str, argument: &Value) -> LilDbResult<Vec<Filter>> {
        match argument {
            Value::Array(items) => items.iter().map(|item| self.parse(item)).collect(),
            _ => {
                log::error!("Invalid argument {} for {}, expected an array", argument, key);
                Err(LilDbError::new(
                    &format!("Invalid query. {} must be an array.", key),
                    ErrorKind::InvalidQuery,
                ))
            }
        }
    }

    fn parse_comparison(
        &self,
        key: &str,
        argument: &Value,
        mode: ComparisonMode,
    ) -> LilDbResult<Filter> {
        self.parse_fields(key, argument, |path, value| {
            Ok(Filter::Comparison(ComparisonFilter::new(path, value.clone(), mode)))
        })
    }

    fn parse_in(&self, key: &str, argument: &Value) -> LilDbResult<Vec<InFilter>> {
        let fields = self.expect_document(key, argument)?;
        let mut filters = Vec::with_capacity(fields.size());
        for (path, values) in fields.iter() {
            match values {
                Value::Array(items) => {
                    filters.push(InFilter::new(FieldPath::parse(path), items.clone()))
                }
                _ => {
                    log::error!("Invalid argument {} for {} on field {}", values, key, path);
                    return Err(LilDbError::new(
                        &format!("Invalid query. Every value of {} must be an array.", key),
                        ErrorKind::InvalidQuery,
                    ));
                }
            }
        }
        Ok(filters)
    }

    /// Parses an operator whose argument maps field paths to operands, one filter per
    /// path, all of which must hold.
    fn parse_fields<F>(&self, key: &str, argument: &Value, build: F) -> LilDbResult<Filter>
    where
        F: Fn(FieldPath, &Value) -> LilDbResult<Filter>,
    {
        let fields = self.expect_document(key, argument)?;
        let mut filters = Vec::with_capacity(fields.size());
        for (path, value) in fields.iter() {
            filters.push(build(FieldPath::parse(path), value)?);
        }
        Ok(Filter::all_of(filters))
    }

    fn expect_document<'a>(&self, key: &str, argument: &'a Value) -> LilDbResult<&'a Document> {
        match argument {
            Value::Document(doc) => Ok(doc),
            _ => {
                log::error!("Invalid argument {} for {}, expected an object", argument, key);
                Err(LilDbError::new(
                    &format!("Invalid query. {} must be an object.", key),
                    ErrorKind::InvalidQuery,
                ))
            }
        }
    }
}

/// A non-empty document whose keys are all operators.
fn operator_document(value: &Value) -> Option<&Document> {
    match value {
        Value::Document(doc)
            if !doc.is_empty() && doc.keys().all(|k| k.starts_with(OPERATOR_PREFIX)) =>
        {
            Some(doc)
        }
        _ => None,
    }
}
