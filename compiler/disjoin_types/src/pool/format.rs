//! Type formatting for error messages.

use disjoin_ir::{StringInterner, TypeId};

use crate::{Pool, TypeData};

impl Pool {
    /// Format a type as a human-readable string.
    pub fn format_type(&self, ty: TypeId, names: &StringInterner) -> String {
        let mut buf = String::new();
        self.format_type_into(ty, names, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, ty: TypeId, names: &StringInterner, buf: &mut String) {
        let Some(data) = self.get(ty) else {
            buf.push_str("<unknown>");
            return;
        };
        match data {
            TypeData::Int { bits } => {
                buf.push('i');
                buf.push_str(&bits.to_string());
            }
            TypeData::Float { bits } => {
                buf.push('f');
                buf.push_str(&bits.to_string());
            }
            TypeData::Bool => buf.push_str("bool"),
            TypeData::Char => buf.push_str("char"),
            TypeData::Str => buf.push_str("str"),
            TypeData::Never => buf.push_str("never"),
            TypeData::Tuple(elems) => {
                buf.push('(');
                for (i, &elem) in elems.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(elem, names, buf);
                }
                if elems.len() == 1 {
                    buf.push(',');
                }
                buf.push(')');
            }
            TypeData::Record(fields) => {
                if fields.is_empty() {
                    buf.push_str("{}");
                    return;
                }
                buf.push_str("{ ");
                for (i, &(name, field_ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    buf.push_str(names.lookup(name));
                    buf.push_str(": ");
                    self.format_type_into(field_ty, names, buf);
                }
                buf.push_str(" }");
            }
            TypeData::Class { name, .. } | TypeData::Enum { name, .. } => {
                buf.push_str(names.lookup(name));
            }
        }
    }
}

#[cfg(test)]
mod tests;
