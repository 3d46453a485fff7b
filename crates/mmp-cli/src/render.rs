// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Output formats for `parse`.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Table};
use mmp_opcua::{NodeRef, OpcuaMetadata, MAXIMUM_DEPTH};

/// Snapshot as pretty JSON.
pub fn json(metadata: &OpcuaMetadata, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &metadata.snapshot())?;
    writeln!(out)?;
    Ok(())
}

/// Machine, then each sensor, with substructure down to [`MAXIMUM_DEPTH`].
pub fn tree(metadata: &OpcuaMetadata, out: &mut impl Write) -> Result<()> {
    match metadata.machine() {
        Some(machine) => {
            writeln!(out, "machine:")?;
            write_subtree(machine, out)?;
        }
        None => writeln!(out, "machine: (none)")?,
    }
    for sensor in metadata.sensors() {
        writeln!(out, "sensor:")?;
        write_subtree(sensor, out)?;
    }
    Ok(())
}

fn write_subtree(root: NodeRef<'_>, out: &mut impl Write) -> Result<()> {
    for (depth, node) in root.walk(MAXIMUM_DEPTH) {
        let indent = "  ".repeat(depth + 1);
        let name = node.display_name().unwrap_or("<unnamed>");
        write!(out, "{indent}{name} [{}]", node.kind())?;
        if let Some(value) = node.value() {
            write!(out, " = {value:?}")?;
        }
        if let Some(data_type) = node.data_type() {
            write!(out, " : {data_type}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Two-column table: machine, sensor count, dangling references, digest.
pub fn summary(metadata: &OpcuaMetadata, out: &mut impl Write) -> Result<()> {
    let digest = metadata.snapshot().digest()?;
    let machine = metadata
        .machine()
        .map_or_else(|| "-".to_owned(), |m| m.display_name().unwrap_or("<unnamed>").to_owned());

    let mut table = Table::new();
    table.set_header(vec!["field", "value"]);
    table.add_row(vec![Cell::new("machine"), Cell::new(machine)]);
    table.add_row(vec![Cell::new("sensors"), Cell::new(metadata.sensor_count())]);
    for sensor in metadata.sensors() {
        table.add_row(vec![
            Cell::new("  sensor"),
            Cell::new(sensor.display_name().unwrap_or("<unnamed>")),
        ]);
    }
    table.add_row(vec![
        Cell::new("dangling references"),
        Cell::new(metadata.report().dangling.len()),
    ]);
    table.add_row(vec![Cell::new("digest"), Cell::new(hex::encode(digest))]);
    writeln!(out, "{table}")?;
    Ok(())
}
