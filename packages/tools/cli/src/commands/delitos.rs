//! 범죄 유형 명령어
//!
//! 목록은 누구나 볼 수 있고 (신고 시 `--delito-id` 선택용),
//! 생성/수정/삭제는 관리자만 가능합니다.

use helpme_core::models::{Delito, NewDelito};

use super::output::{applied, print_json, OutputFormat};
use crate::context::AppContext;

pub async fn list(ctx: &AppContext) -> anyhow::Result<()> {
    let delitos = ctx.stack.delitos().list().await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&delitos);
    }

    if delitos.is_empty() {
        println!("No delitos.");
        return Ok(());
    }

    for delito in &delitos {
        print_delito(delito);
    }
    Ok(())
}

pub async fn create(ctx: &AppContext, nombre: &str, descripcion: &str) -> anyhow::Result<()> {
    let mut table = ctx.stack.delito_table();
    let Some(created) = applied(table.create(&NewDelito::new(nombre, descripcion)).await?) else {
        return Ok(());
    };

    match (ctx.format, created) {
        (OutputFormat::Json, created) => print_json(&created),
        (OutputFormat::Text, Some(created)) => {
            println!("Delito created.");
            print_delito(&created);
            Ok(())
        }
        (OutputFormat::Text, None) => {
            println!("Delito created.");
            Ok(())
        }
    }
}

pub async fn update(
    ctx: &AppContext,
    id: i64,
    nombre: Option<String>,
    descripcion: Option<String>,
) -> anyhow::Result<()> {
    let mut table = ctx.stack.delito_table();
    if applied(table.load().await?).is_none() {
        return Ok(());
    }

    let mut delito = table
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Delito {} not found", id))?;
    if let Some(nombre) = nombre {
        if nombre.trim().is_empty() {
            anyhow::bail!("Nombre requerido");
        }
        delito.nombre = Some(nombre);
    }
    if let Some(descripcion) = descripcion {
        delito.descripcion = Some(descripcion);
    }

    let Some(updated) = applied(table.update(&delito).await?) else {
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => print_json(&updated),
        OutputFormat::Text => {
            println!("Delito updated.");
            print_delito(&updated);
            Ok(())
        }
    }
}

pub async fn delete(ctx: &AppContext, id: i64) -> anyhow::Result<()> {
    let mut table = ctx.stack.delito_table();
    if applied(table.delete(id).await?).is_some() {
        println!("Delito {} deleted.", id);
    }
    Ok(())
}

fn print_delito(delito: &Delito) {
    println!("{}", delito_line(delito));
    if !delito.descripcion().is_empty() {
        println!("  {}", delito.descripcion());
    }
}

fn delito_line(delito: &Delito) -> String {
    format!("- #{} {} (by {})", delito.id, delito.nombre(), delito.creator())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delito_line_shows_id_for_report() {
        let delito: Delito = serde_json::from_value(json!({
            "id": 3, "nombre": "Hurto", "descripcion": null,
            "usuario": {"nombre": "Ana", "apellido": "Gómez"}
        }))
        .unwrap();
        assert_eq!(delito_line(&delito), "- #3 Hurto (by Ana Gómez)");

        let unnamed: Delito = serde_json::from_value(json!({"id": 4, "nombre": null})).unwrap();
        assert_eq!(delito_line(&unnamed), "- #4  (by Desconocido)");
    }
}
