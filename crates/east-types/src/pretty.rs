//! Type pretty-printing, used only to build diagnostic messages (spec §4.1:
//! "the pretty-printer is used for error messages only").

use crate::types::{Type, TypeKind};
use std::fmt::Write as _;

pub fn display(ty: &Type) -> String {
    let mut out = String::new();
    write_type(ty, &mut out);
    out
}

fn write_type(ty: &Type, out: &mut String) {
    match ty.kind() {
        TypeKind::Never => out.push_str("Never"),
        TypeKind::Null => out.push_str("Null"),
        TypeKind::Boolean => out.push_str("Boolean"),
        TypeKind::Integer => out.push_str("Integer"),
        TypeKind::Float => out.push_str("Float"),
        TypeKind::String => out.push_str("String"),
        TypeKind::DateTime => out.push_str("DateTime"),
        TypeKind::Blob => out.push_str("Blob"),
        TypeKind::Ref(elem) => {
            out.push_str("Ref<");
            write_type(elem, out);
            out.push('>');
        }
        TypeKind::Array(elem) => {
            out.push_str("Array<");
            write_type(elem, out);
            out.push('>');
        }
        TypeKind::Set(key) => {
            out.push_str("Set<");
            write_type(key, out);
            out.push('>');
        }
        TypeKind::Dict(key, value) => {
            out.push_str("Dict<");
            write_type(key, out);
            out.push_str(", ");
            write_type(value, out);
            out.push('>');
        }
        TypeKind::Struct(fields) => {
            out.push_str("Struct{");
            write_fields(fields, out);
            out.push('}');
        }
        TypeKind::Variant(cases) => {
            out.push_str("Variant{");
            write_fields(cases, out);
            out.push('}');
        }
        TypeKind::Function(inputs, output) => {
            out.push_str("Function(");
            write_type_list(inputs, out);
            out.push_str(", ");
            write_type(output, out);
            out.push(')');
        }
        TypeKind::AsyncFunction(inputs, output) => {
            out.push_str("AsyncFunction(");
            write_type_list(inputs, out);
            out.push_str(", ");
            write_type(output, out);
            out.push(')');
        }
        TypeKind::Recursive(shape) => {
            let _ = write!(out, "Recursive(self@{} -> ", shape.id_for_display());
            write_type(&shape.body, out);
            out.push(')');
        }
        TypeKind::RecursiveSelf(id) => {
            let _ = write!(out, "self@{}", id.for_display());
        }
    }
}

fn write_fields(fields: &[(east_common::Atom, Type)], out: &mut String) {
    for (i, (name, t)) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{name}: ");
        write_type(t, out);
    }
}

fn write_type_list(types: &[Type], out: &mut String) {
    out.push('[');
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(t, out);
    }
    out.push(']');
}
