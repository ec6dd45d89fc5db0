//! Virtual dispatch layouts
//!
//! Each class gets a method table and a field list that extend its
//! super-class's: inherited slots keep their position, an override replaces
//! the inherited slot, and new entries are appended in declaration order.

use super::symbols::{SymbolId, SymbolKind, SymbolTable};

/// Method table and field order of one class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLayout {
    /// Virtual (non-static) methods in slot order
    pub methods: Vec<SymbolId>,
    /// Member variables, ancestors first
    pub fields: Vec<SymbolId>,
}

impl ClassLayout {
    /// Derive the layout of a class from its super-class layout
    pub fn extend(parent: Option<&ClassLayout>, table: &SymbolTable, class: SymbolId) -> ClassLayout {
        let mut layout = parent.cloned().unwrap_or_default();
        let Some(info) = table.symbol(class).as_class() else {
            return layout;
        };

        for &member in table.scope(info.scope).symbols() {
            let symbol = table.symbol(member);
            match symbol.kind {
                SymbolKind::Method(method) if !method.is_static => {
                    let slot = layout
                        .methods
                        .iter()
                        .position(|&m| table.symbol(m).name == symbol.name);
                    match slot {
                        Some(index) => layout.methods[index] = member,
                        None => layout.methods.push(member),
                    }
                }
                SymbolKind::Variable(var) if var.is_member => layout.fields.push(member),
                _ => {}
            }
        }
        layout
    }

    /// Slot index of a virtual method
    pub fn method_slot(&self, table: &SymbolTable, name: &str) -> Option<usize> {
        self.methods.iter().position(|&m| table.symbol(m).name == name)
    }

    /// Index of a member variable
    pub fn field_index(&self, table: &SymbolTable, name: &str) -> Option<usize> {
        self.fields.iter().position(|&f| table.symbol(f).name == name)
    }
}
