use anyhow::Result;
use knowcode_context::{
    ClassMembers, CodeContext, CodeShape, ContextKind, FunctionSignature, Language, PatternTables,
    Position,
};
use serde::Serialize;

/// Context plus structural analysis of its text
#[derive(Debug, Serialize)]
pub(crate) struct InspectReport {
    pub language: Language,
    pub context: CodeContext,
    pub shape: CodeShape,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<FunctionSignature>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<ClassMembers>,
}

impl InspectReport {
    pub(crate) fn build(tables: &PatternTables, context: CodeContext, language: Language) -> Self {
        let shape = CodeShape::detect(tables, &context.text, language);
        let signature = (context.kind == ContextKind::Function)
            .then(|| FunctionSignature::extract(tables, &context.text, language));
        let members = (context.kind == ContextKind::Class)
            .then(|| ClassMembers::extract(tables, &context.text, language));

        Self {
            language,
            context,
            shape,
            signature,
            members,
        }
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn render_context(context: &CodeContext) -> String {
    let mut out = format!("{} {}", context.kind, context.region);
    if let Some(name) = &context.name {
        out.push(' ');
        out.push_str(name);
    }
    if !context.text.is_empty() {
        out.push('\n');
        out.push_str(&context.text);
    }
    out
}

pub(crate) fn render_missing(kind: ContextKind, position: Position) -> String {
    format!("no {kind} at {position}")
}

pub(crate) fn render_inspect(report: &InspectReport) -> String {
    let context = &report.context;
    let mut out = format!("{} {}", context.kind, context.region);
    if let Some(name) = &context.name {
        out.push_str(&format!(" {name}"));
    }
    out.push_str(&format!("\nlanguage: {}", report.language));
    out.push_str(&format!("\nshape: {}", report.shape));

    if let Some(signature) = &report.signature {
        out.push_str(&format!("\nparameters: {}", join_or_none(&signature.parameters)));
        if let Some(return_type) = &signature.return_type {
            out.push_str(&format!("\nreturns: {return_type}"));
        }
    }
    if let Some(members) = &report.members {
        out.push_str(&format!("\nmethods: {}", join_or_none(&members.methods)));
        out.push_str(&format!("\nproperties: {}", join_or_none(&members.properties)));
    }

    if !context.text.is_empty() {
        out.push_str("\n\n");
        out.push_str(&context.text);
    }
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
