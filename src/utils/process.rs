use anyhow::{anyhow, Result};
use serde::Serialize;
use sysinfo::System;

/// Memory figures for `/status`, all in bytes.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_available: u64,
}

pub fn memory_usage() -> Result<MemoryUsage> {
    let pid = sysinfo::get_current_pid()
        .map_err(|e| anyhow!("Failed to resolve current pid: {}", e))?;

    let mut system = System::new();
    system.refresh_memory();
    if !system.refresh_process(pid) {
        return Err(anyhow!("Process {} not found", pid));
    }

    let process = system
        .process(pid)
        .ok_or_else(|| anyhow!("Process {} not found", pid))?;

    Ok(MemoryUsage {
        rss: process.memory(),
        virtual_memory: process.virtual_memory(),
        system_total: system.total_memory(),
        system_available: system.available_memory(),
    })
}
