//! 사건 신고 명령어

use chrono::Local;
use helpme_core::models::Caso;
use helpme_core::report::{parse_fecha_hora, CasoDraft, MapSelection};

use super::output::{print_json, OutputFormat};
use crate::context::AppContext;

/// 신고 입력
#[derive(Debug, Default, clap::Args)]
pub struct ReportArgs {
    /// 사건 설명
    #[arg(long, default_value = "")]
    pub descripcion: String,

    /// 범죄 유형 ID ('hm delitos list' 참고)
    #[arg(long)]
    pub delito_id: Option<i64>,

    /// 사건 일시 (예: 2024-03-01T10:30)
    #[arg(long)]
    pub fecha_hora: Option<String>,

    /// 위도 (지도 선택 결과)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// 경도 (지도 선택 결과)
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// 지도 URL (지도 선택 결과)
    #[arg(long)]
    pub map_url: Option<String>,

    /// RMI URL (지도 선택 결과)
    #[arg(long, default_value = "")]
    pub rmi_url: String,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub altitud: f64,
}

impl ReportArgs {
    fn into_draft(self, draft: &mut CasoDraft) -> anyhow::Result<()> {
        if let Some(input) = &self.fecha_hora {
            draft.fecha_hora = Some(
                parse_fecha_hora(input)
                    .ok_or_else(|| anyhow::anyhow!("Invalid date/time '{}'", input))?,
            );
        }
        if let (Some(lat), Some(lng), Some(map_url)) = (self.lat, self.lng, self.map_url) {
            draft.apply_map_selection(MapSelection {
                lat,
                lng,
                map_url,
                rmi_url: self.rmi_url,
            });
        }
        draft.descripcion = self.descripcion;
        draft.delito_id = self.delito_id;
        draft.altitud = self.altitud;
        Ok(())
    }
}

pub async fn report(ctx: &AppContext, args: ReportArgs) -> anyhow::Result<()> {
    let identity = ctx.stack.gate().current_identity();
    if !identity.is_authenticated() {
        anyhow::bail!("Not logged in. Use 'hm login' first.");
    }

    let mut draft = CasoDraft::for_user(identity.user());
    args.into_draft(&mut draft)?;
    let caso = draft.validate(Local::now().date_naive())?;

    let created = ctx.stack.casos().create(&caso).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&created),
        OutputFormat::Text => {
            println!("{}", confirmation(created.as_ref()));
            Ok(())
        }
    }
}

fn confirmation(created: Option<&Caso>) -> String {
    match created {
        Some(caso) => format!("Caso #{} reported. Thank you.", caso.id),
        None => "Caso reported. Thank you.".to_string(),
    }
}
