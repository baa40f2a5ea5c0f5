use anyhow::{Context, Result};
use jclassfile::attributes::Attribute;
use jclassfile::class_file;
use jclassfile::constant_pool::ConstantPool;

use crate::bytecode::instruction_categories;
use crate::ir::{ClassEvent, ClassKind, Visibility};
use crate::opcodes;

const RECORD_BASE: &str = "java/lang/Record";

/// Decode one class file into the event stream consumed by an ingestion session.
///
/// Events follow class-file order: the class itself, its fields, then each method
/// followed by the instructions of its body.
pub(crate) fn decode_class(data: &[u8]) -> Result<Vec<ClassEvent>> {
    let class_file = class_file::parse(data).context("failed to parse class file")?;
    let constant_pool = class_file.constant_pool();

    let name = resolve_class_name(constant_pool, class_file.this_class())?;
    let parent = match class_file.super_class() {
        0 => None,
        index => Some(resolve_class_name(constant_pool, index)?),
    };
    let kind = class_kind(class_file.access_flags().bits(), parent.as_deref());

    let mut events = vec![ClassEvent::ClassEntered {
        name: name.clone(),
        kind,
        parent,
    }];
    for _ in class_file.fields() {
        events.push(ClassEvent::FieldDeclared);
    }

    for method in class_file.methods() {
        let method_name = resolve_utf8(constant_pool, method.name_index())?;
        let descriptor = resolve_utf8(constant_pool, method.descriptor_index())?;
        let visibility = visibility(method.access_flags().bits());

        let mut instructions = Vec::new();
        for attribute in method.attributes() {
            if let Attribute::Code { code, .. } = attribute {
                instructions = instruction_categories(code).with_context(|| {
                    format!("failed to decode {name}.{method_name}{descriptor}")
                })?;
            }
        }

        events.push(ClassEvent::MethodDeclared {
            name: method_name,
            descriptor,
            visibility,
        });
        for category in instructions {
            events.push(ClassEvent::InstructionObserved(category));
        }
    }

    Ok(events)
}

fn class_kind(access: u16, parent: Option<&str>) -> ClassKind {
    if access & opcodes::ACC_MODULE != 0 {
        ClassKind::Module
    } else if access & opcodes::ACC_INTERFACE != 0 {
        ClassKind::Interface
    } else if access & opcodes::ACC_ENUM != 0 {
        ClassKind::Enum
    } else if parent == Some(RECORD_BASE) {
        ClassKind::Record
    } else {
        ClassKind::Ordinary
    }
}

fn visibility(access: u16) -> Visibility {
    if access & opcodes::ACC_PRIVATE != 0 {
        Visibility::Private
    } else if access & opcodes::ACC_PROTECTED != 0 {
        Visibility::Protected
    } else if access & opcodes::ACC_PUBLIC != 0 {
        Visibility::Public
    } else {
        Visibility::Package
    }
}

fn resolve_utf8(constant_pool: &[ConstantPool], index: u16) -> Result<String> {
    match constant_pool.get(index as usize) {
        Some(ConstantPool::Utf8 { value }) => Ok(value.clone()),
        Some(_) => anyhow::bail!("constant pool entry {index} is not UTF-8"),
        None => anyhow::bail!("missing constant pool entry {index}"),
    }
}

fn resolve_class_name(constant_pool: &[ConstantPool], index: u16) -> Result<String> {
    match constant_pool.get(index as usize) {
        Some(ConstantPool::Class { name_index }) => resolve_utf8(constant_pool, *name_index),
        Some(_) => anyhow::bail!("constant pool entry {index} is not a class"),
        None => anyhow::bail!("missing constant pool entry {index}"),
    }
}
