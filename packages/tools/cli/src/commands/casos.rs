//! 사건 관리 명령어 (관리자 전용)

use helpme_core::models::Caso;
use helpme_core::report::{parse_fecha_hora, FECHA_HORA_FORMAT};

use super::output::{applied, print_json, OutputFormat};
use crate::context::AppContext;

/// 사건 수정 항목 (지정한 값만 변경)
#[derive(Debug, Default, clap::Args)]
pub struct CasoEdit {
    #[arg(long)]
    pub descripcion: Option<String>,

    /// 공개 여부
    #[arg(long)]
    pub visible: Option<bool>,

    /// 사건 일시 (예: 2024-03-01T10:30)
    #[arg(long)]
    pub fecha_hora: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// 지도 링크
    #[arg(long)]
    pub map_url: Option<String>,
}

impl CasoEdit {
    fn apply(self, caso: &mut Caso) -> anyhow::Result<()> {
        if let Some(descripcion) = self.descripcion {
            caso.descripcion = Some(descripcion);
        }
        if let Some(visible) = self.visible {
            caso.visible = Some(visible);
        }
        if let Some(input) = self.fecha_hora {
            let fecha_hora = parse_fecha_hora(&input)
                .ok_or_else(|| anyhow::anyhow!("Invalid date/time '{}'", input))?;
            caso.fecha_hora = Some(fecha_hora.format(FECHA_HORA_FORMAT).to_string());
        }
        if let Some(lat) = self.lat {
            caso.latitud = Some(lat);
        }
        if let Some(lng) = self.lng {
            caso.longitud = Some(lng);
        }
        if let Some(url) = self.map_url {
            if url.trim().is_empty() {
                anyhow::bail!("Map URL must not be empty");
            }
            caso.url_mapa = Some(url);
        }
        Ok(())
    }
}

pub async fn list(ctx: &AppContext) -> anyhow::Result<()> {
    let mut table = ctx.stack.caso_table();
    if applied(table.load().await?).is_none() {
        return Ok(());
    }

    if ctx.format == OutputFormat::Json {
        return print_json(table.rows());
    }

    if table.rows().is_empty() {
        println!("No casos.");
        return Ok(());
    }

    for caso in table.rows() {
        print_caso(caso);
    }
    Ok(())
}

pub async fn update(ctx: &AppContext, id: i64, edit: CasoEdit) -> anyhow::Result<()> {
    let mut table = ctx.stack.caso_table();
    if applied(table.load().await?).is_none() {
        return Ok(());
    }

    let mut caso = table
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Caso {} not found", id))?;
    edit.apply(&mut caso)?;

    let Some(updated) = applied(table.update(&caso).await?) else {
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => print_json(&updated),
        OutputFormat::Text => {
            println!("Caso updated.");
            print_caso(&updated);
            Ok(())
        }
    }
}

pub async fn delete(ctx: &AppContext, id: i64) -> anyhow::Result<()> {
    let mut table = ctx.stack.caso_table();
    if applied(table.delete(id).await?).is_some() {
        println!("Caso {} deleted.", id);
    }
    Ok(())
}

fn print_caso(caso: &Caso) {
    println!(
        "- #{} {} [{}] {}",
        caso.id,
        caso.fecha_hora.as_deref().unwrap_or("-"),
        if caso.is_visible() { "visible" } else { "hidden" },
        caso.descripcion.as_deref().unwrap_or_default()
    );
    if let (Some(lat), Some(lng)) = (caso.latitud, caso.longitud) {
        println!("  at ({}, {}) reported by {}", lat, lng, caso.reporter());
    } else {
        println!("  reported by {}", caso.reporter());
    }
    if let Some(url) = &caso.url_mapa {
        println!("  map: {}", url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caso() -> Caso {
        serde_json::from_value(json!({
            "id": 5, "fechaHora": "2024-03-01T10:30", "latitud": 6.2, "longitud": -75.5,
            "visible": true, "descripcion": "Robo", "delitoId": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let mut caso = caso();
        let edit = CasoEdit {
            visible: Some(false),
            fecha_hora: Some("2024-03-02 08:15".to_string()),
            lat: Some(6.25),
            lng: Some(-75.56),
            map_url: Some("https://maps.example/?q=6.25,-75.56".to_string()),
            ..Default::default()
        };
        edit.apply(&mut caso).unwrap();

        assert!(!caso.is_visible());
        assert_eq!(caso.fecha_hora.as_deref(), Some("2024-03-02T08:15"));
        assert_eq!(caso.latitud, Some(6.25));
        assert_eq!(caso.longitud, Some(-75.56));
        assert_eq!(
            caso.url_mapa.as_deref(),
            Some("https://maps.example/?q=6.25,-75.56")
        );
        assert_eq!(caso.descripcion.as_deref(), Some("Robo"));
        assert_eq!(caso.extra["delitoId"], 2);
    }

    #[test]
    fn test_edit_keeps_location_when_not_given() {
        let mut caso = caso();
        let edit = CasoEdit {
            descripcion: Some("Hurto".to_string()),
            ..Default::default()
        };
        edit.apply(&mut caso).unwrap();

        assert_eq!(caso.latitud, Some(6.2));
        assert_eq!(caso.longitud, Some(-75.5));
        assert_eq!(caso.descripcion.as_deref(), Some("Hurto"));
    }

    #[test]
    fn test_edit_rejects_blank_map_url() {
        let mut caso = caso();
        let edit = CasoEdit {
            map_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(edit.apply(&mut caso).is_err());
    }

    #[test]
    fn test_edit_rejects_bad_date() {
        let mut caso = caso();
        let edit = CasoEdit {
            fecha_hora: Some("ayer".to_string()),
            ..Default::default()
        };
        assert!(edit.apply(&mut caso).is_err());
    }
}
