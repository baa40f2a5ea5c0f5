//! Hand-assembled class files for decoder and scanner tests.

use std::collections::HashMap;

pub(crate) const ACC_CLASS: u16 = 0x0021;
pub(crate) const ACC_INTERFACE_TYPE: u16 = 0x0601;
pub(crate) const ACC_ENUM_TYPE: u16 = 0x4031;
pub(crate) const ACC_FINAL_CLASS: u16 = 0x0031;

/// Method emitted into a test class.
pub(crate) struct TestMethod {
    pub(crate) access: u16,
    pub(crate) name: &'static str,
    pub(crate) descriptor: &'static str,
    pub(crate) code: Option<Vec<u8>>,
    /// Type descriptor of a `RuntimeInvisibleParameterAnnotations` entry on the first parameter.
    pub(crate) parameter_annotation: Option<&'static str>,
}

impl TestMethod {
    pub(crate) fn public(name: &'static str, code: Vec<u8>) -> Self {
        Self {
            access: 0x0001,
            name,
            descriptor: "()V",
            code: Some(code),
            parameter_annotation: None,
        }
    }
}

/// Class file shape; `build` produces Java 8 class bytes.
pub(crate) struct TestClass {
    pub(crate) access: u16,
    pub(crate) name: &'static str,
    pub(crate) super_name: Option<&'static str>,
    pub(crate) field_count: usize,
    pub(crate) methods: Vec<TestMethod>,
}

impl TestClass {
    pub(crate) fn ordinary(name: &'static str, super_name: &'static str) -> Self {
        Self {
            access: ACC_CLASS,
            name,
            super_name: Some(super_name),
            field_count: 0,
            methods: Vec::new(),
        }
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut pool = Pool::default();
        let this_index = pool.class(self.name);
        let super_index = self.super_name.map_or(0, |name| pool.class(name));
        let field_names: Vec<String> = (0..self.field_count).map(|i| format!("f{i}")).collect();
        let fields: Vec<(u16, u16)> = field_names
            .iter()
            .map(|name| (pool.utf8(name), pool.utf8("I")))
            .collect();
        let code_index = pool.utf8("Code");
        let methods: Vec<(u16, u16, Option<(u16, u16)>, &TestMethod)> = self
            .methods
            .iter()
            .map(|method| {
                let annotation = method.parameter_annotation.map(|type_name| {
                    let attribute_index = pool.utf8("RuntimeInvisibleParameterAnnotations");
                    (attribute_index, pool.utf8(type_name))
                });
                let name_index = pool.utf8(method.name);
                (name_index, pool.utf8(method.descriptor), annotation, method)
            })
            .collect();

        let mut out = Vec::new();
        out.extend(0xCAFE_BABEu32.to_be_bytes());
        out.extend(0u16.to_be_bytes());
        out.extend(52u16.to_be_bytes());
        out.extend((pool.entries.len() as u16 + 1).to_be_bytes());
        for entry in &pool.entries {
            out.extend(entry);
        }
        out.extend(self.access.to_be_bytes());
        out.extend(this_index.to_be_bytes());
        out.extend(super_index.to_be_bytes());
        out.extend(0u16.to_be_bytes());

        out.extend((fields.len() as u16).to_be_bytes());
        for (name_index, descriptor_index) in fields {
            out.extend(0x0002u16.to_be_bytes());
            out.extend(name_index.to_be_bytes());
            out.extend(descriptor_index.to_be_bytes());
            out.extend(0u16.to_be_bytes());
        }

        out.extend((methods.len() as u16).to_be_bytes());
        for (name_index, descriptor_index, annotation, method) in methods {
            out.extend(method.access.to_be_bytes());
            out.extend(name_index.to_be_bytes());
            out.extend(descriptor_index.to_be_bytes());
            let attribute_count =
                u16::from(method.code.is_some()) + u16::from(annotation.is_some());
            out.extend(attribute_count.to_be_bytes());
            if let Some(code) = &method.code {
                out.extend(code_index.to_be_bytes());
                out.extend((12 + code.len() as u32).to_be_bytes());
                out.extend(4u16.to_be_bytes());
                out.extend(4u16.to_be_bytes());
                out.extend((code.len() as u32).to_be_bytes());
                out.extend(code);
                out.extend(0u16.to_be_bytes());
                out.extend(0u16.to_be_bytes());
            }
            if let Some((attribute_index, type_index)) = annotation {
                // one parameter carrying one annotation without element values
                out.extend(attribute_index.to_be_bytes());
                out.extend(7u32.to_be_bytes());
                out.push(1);
                out.extend(1u16.to_be_bytes());
                out.extend(type_index.to_be_bytes());
                out.extend(0u16.to_be_bytes());
            }
        }

        out.extend(0u16.to_be_bytes());
        out
    }
}

#[derive(Default)]
struct Pool {
    entries: Vec<Vec<u8>>,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl Pool {
    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(index) = self.utf8.get(value) {
            return *index;
        }
        let mut entry = vec![1];
        entry.extend((value.len() as u16).to_be_bytes());
        entry.extend(value.as_bytes());
        let index = self.push(entry);
        self.utf8.insert(value.to_string(), index);
        index
    }

    fn class(&mut self, name: &str) -> u16 {
        if let Some(index) = self.classes.get(name) {
            return *index;
        }
        let name_index = self.utf8(name);
        let mut entry = vec![7];
        entry.extend(name_index.to_be_bytes());
        let index = self.push(entry);
        self.classes.insert(name.to_string(), index);
        index
    }

    fn push(&mut self, entry: Vec<u8>) -> u16 {
        self.entries.push(entry);
        self.entries.len() as u16
    }
}
