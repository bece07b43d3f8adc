//! Decoding of `parameter` elements into [`ParameterDescriptor`]s.

use tracing::{debug, trace};

use crate::error::{ParseError, ParseResult};
use crate::model::{FilterCriteria, ParameterDescriptor, ParameterOption, ParameterType};
use crate::validate::{AttributeMap, AttributeValidator};
use crate::xml::{NodeCursor, XmlContent, XmlNode};

pub const PARAMETER_NODE: &str = "parameter";

const PARAMETER_CHILDREN: &[&str] =
    &["context", "default", "label", "description", "options", "filter"];

/// Decodes consecutive `parameter` children of a node, preserving order.
#[derive(Debug, Clone)]
pub struct ParameterListParser {
    parameter_attributes: AttributeValidator,
    option_attributes: AttributeValidator,
    criteria_attributes: AttributeValidator,
    no_attributes: AttributeValidator,
}

impl Default for ParameterListParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterListParser {
    pub fn new() -> Self {
        Self {
            parameter_attributes: AttributeValidator::new(&[
                ("name", true),
                ("type", true),
                ("min", false),
                ("max", false),
                ("step", false),
                ("pattern", false),
                ("required", false),
                ("readOnly", false),
                ("multiple", false),
            ]),
            option_attributes: AttributeValidator::new(&[("value", true)]),
            criteria_attributes: AttributeValidator::new(&[("name", true)]),
            no_attributes: AttributeValidator::new(&[]),
        }
    }

    /// Consume every leading `parameter` child under the cursor.
    ///
    /// Stops at the first piece of content that is not a `parameter` element and
    /// leaves it on the cursor for the caller to deal with.
    pub fn parse_list(&self, cursor: &mut NodeCursor<'_>) -> ParseResult<Vec<ParameterDescriptor>> {
        let mut parameters = Vec::new();
        while let Some(node) = cursor.next_if_named(PARAMETER_NODE) {
            parameters.push(self.parse_parameter(node)?);
        }
        trace!(parent = %cursor.node_name(), count = parameters.len(), "parameter list decoded");
        Ok(parameters)
    }

    /// Decode one `parameter` element.
    pub fn parse_parameter(&self, node: &XmlNode) -> ParseResult<ParameterDescriptor> {
        let attrs = self.parameter_attributes.read_validated(node)?;

        let name = attrs.required("name");
        if name.is_empty() {
            return Err(invalid(node, "name", name, "parameter names must not be empty"));
        }
        let type_text = attrs.required("type");
        let kind: ParameterType =
            type_text.parse().map_err(|reason: String| invalid(node, "type", type_text, &reason))?;

        let mut parameter = ParameterDescriptor::new(name, kind);
        parameter.min = decimal_attr(node, &attrs, "min")?;
        parameter.max = decimal_attr(node, &attrs, "max")?;
        parameter.step = decimal_attr(node, &attrs, "step")?;
        parameter.pattern = attrs.get("pattern").map(str::to_string);
        parameter.required = bool_attr(node, &attrs, "required")?;
        parameter.read_only = bool_attr(node, &attrs, "readOnly")?;
        parameter.multiple = bool_attr(node, &attrs, "multiple")?;

        if let (Some(min), Some(max)) = (parameter.min, parameter.max) {
            if min > max {
                return Err(invalid(
                    node,
                    "min",
                    &min.to_string(),
                    &format!("min is greater than max ({max})"),
                ));
            }
        }
        if let Some(step) = parameter.step {
            if step <= 0.0 {
                return Err(invalid(node, "step", &step.to_string(), "step must be positive"));
            }
        }

        self.parse_children(node, &mut parameter)?;

        if let Some(default) = parameter.default.as_deref() {
            check_default(node, kind, default)?;
        }

        debug!(parameter = %parameter.name, kind = %parameter.kind, "parameter decoded");
        Ok(parameter)
    }

    fn parse_children(&self, node: &XmlNode, parameter: &mut ParameterDescriptor) -> ParseResult<()> {
        let mut seen: Vec<&str> = Vec::new();
        let mut cursor = node.cursor();

        while let Some(content) = cursor.next_child() {
            let child = match content {
                XmlContent::Element(child) => child,
                XmlContent::Text(_) => {
                    return Err(ParseError::UnexpectedContent {
                        node: node.name().to_string(),
                        found: content.describe().to_string(),
                    })
                }
            };

            let name = child.name();
            if !PARAMETER_CHILDREN.contains(&name) || seen.contains(&name) {
                let remaining: Vec<&str> =
                    PARAMETER_CHILDREN.iter().copied().filter(|c| !seen.contains(c)).collect();
                return Err(ParseError::UnexpectedNode {
                    parent: node.name().to_string(),
                    found: name.to_string(),
                    expected: remaining.join(", "),
                });
            }
            seen.push(name);

            match name {
                "context" => parameter.context = Some(self.read_text_element(child)?),
                "default" => parameter.default = Some(self.read_text_element(child)?),
                "label" => parameter.label = Some(self.read_text_element(child)?),
                "description" => parameter.description = Some(self.read_text_element(child)?),
                "options" => parameter.options = self.parse_options(child)?,
                "filter" => parameter.filter = self.parse_filter(child)?,
                _ => unreachable!("checked against PARAMETER_CHILDREN"),
            }
        }

        Ok(())
    }

    fn parse_options(&self, node: &XmlNode) -> ParseResult<Vec<ParameterOption>> {
        self.no_attributes.read_validated(node)?;
        let mut cursor = node.cursor();
        let mut options = Vec::new();
        while let Some(option) = cursor.next_if_named("option") {
            let attrs = self.option_attributes.read_validated(option)?;
            let value = attrs.required("value").to_string();
            let label = read_text(option)?.unwrap_or_else(|| value.clone());
            options.push(ParameterOption { value, label });
        }
        cursor.assert_end_of_node()?;
        Ok(options)
    }

    fn parse_filter(&self, node: &XmlNode) -> ParseResult<Vec<FilterCriteria>> {
        self.no_attributes.read_validated(node)?;
        let mut cursor = node.cursor();
        let mut criteria = Vec::new();
        while let Some(criterion) = cursor.next_if_named("criteria") {
            let attrs = self.criteria_attributes.read_validated(criterion)?;
            criteria.push(FilterCriteria {
                name: attrs.required("name").to_string(),
                value: read_text(criterion)?.unwrap_or_default(),
            });
        }
        cursor.assert_end_of_node()?;
        Ok(criteria)
    }

    fn read_text_element(&self, node: &XmlNode) -> ParseResult<String> {
        self.no_attributes.read_validated(node)?;
        Ok(read_text(node)?.unwrap_or_default())
    }
}

/// Text content of a leaf element; child elements are not allowed.
fn read_text(node: &XmlNode) -> ParseResult<Option<String>> {
    let mut cursor = node.cursor();
    let mut text: Option<String> = None;
    while let Some(XmlContent::Text(part)) = cursor.peek() {
        cursor.next_child();
        match text.as_mut() {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(part);
            }
            None => text = Some(part.clone()),
        }
    }
    cursor.assert_end_of_node()?;
    Ok(text)
}

fn decimal_attr(node: &XmlNode, attrs: &AttributeMap, name: &str) -> ParseResult<Option<f64>> {
    let Some(raw) = attrs.get(name) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(invalid(node, name, raw, "expected a decimal number")),
    }
}

fn bool_attr(node: &XmlNode, attrs: &AttributeMap, name: &str) -> ParseResult<bool> {
    match attrs.get(name) {
        None => Ok(false),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(invalid(node, name, other, "expected 'true' or 'false'")),
    }
}

fn check_default(node: &XmlNode, kind: ParameterType, value: &str) -> ParseResult<()> {
    let ok = match kind {
        ParameterType::Text => true,
        ParameterType::Integer => value.parse::<i64>().is_ok(),
        ParameterType::Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
        ParameterType::Boolean => matches!(value, "true" | "false"),
    };
    if ok {
        Ok(())
    } else {
        Err(invalid(node, "default", value, &format!("not a valid {kind} value")))
    }
}

fn invalid(node: &XmlNode, field: &str, value: &str, reason: &str) -> ParseError {
    ParseError::InvalidValue {
        node: node.name().to_string(),
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
