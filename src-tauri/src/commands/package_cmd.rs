//! Package Commands
//!
//! Listing, inspecting and deleting packages in registry storage.

use serde_json::Value;
use tauri::State;

use crate::domain::{PackageInfo, PackageKind, Page};
use crate::AppState;

/// One page of packages of `package_type`, sorted by name
#[tauri::command]
pub async fn get_packages(
    state: State<'_, AppState>,
    port: u16,
    package_type: PackageKind,
    page: usize,
    page_size: usize,
) -> Result<Page<PackageInfo>, String> {
    state
        .packages
        .list(port, package_type, page, page_size)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_package_count(
    state: State<'_, AppState>,
    port: u16,
    package_type: PackageKind,
) -> Result<usize, String> {
    state.packages.count(port, package_type).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_package(state: State<'_, AppState>, package_name: String) -> Result<(), String> {
    state.packages.delete(&package_name).map_err(|e| e.to_string())
}

/// Delete every package of `package_type`; returns how many were removed
#[tauri::command]
pub async fn delete_packages(
    state: State<'_, AppState>,
    port: u16,
    package_type: PackageKind,
) -> Result<usize, String> {
    state
        .packages
        .delete_kind(port, package_type)
        .await
        .map_err(|e| e.to_string())
}

/// Full metadata document for `package_name`
#[tauri::command]
pub async fn get_package_details(
    state: State<'_, AppState>,
    port: u16,
    package_name: String,
) -> Result<Value, String> {
    state.packages.details(port, &package_name).await.map_err(|e| e.to_string())
}
