use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use derma_analysis::{AnalysisResult, HttpAnalysisClient, SubmissionFlow};
use derma_auth::TokenProvider;
use derma_core::{Assessment, ImageSource};
use derma_config::DermaConfig;
use derma_media::{
    CameraDevice, CapturedImage, MediaAcquisitionController, MediaError, NoCamera, PickedFile,
    ReplayCamera,
};
use derma_survey::load_context;
use serde::Serialize;

use crate::cli::root_commands::AnalyzeArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AnalyzeResponse<'a> {
    source: ImageSource,
    file_name: &'a str,
    bytes: usize,
    context_attached: bool,
    authenticated: bool,
    assessment: &'a Assessment,
}

pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let captured = match (&args.replay_camera, &args.path) {
        (Some(feed), fallback) => {
            let camera = ReplayCamera::from_path(feed)
                .with_context(|| format!("failed to load camera feed {}", feed.display()))?;
            capture_or_select(camera, fallback.as_deref(), &ctx.config).await?
        }
        (None, Some(path)) => select(path, &ctx.config)?,
        (None, None) => anyhow::bail!("analyze: pass an image path or --replay-camera"),
    };

    let context = match &args.user {
        Some(user) => {
            let context = load_context(&ctx.surveys, user).await;
            if context.is_none() {
                tracing::warn!(user = %user, "no usable survey; analysing without context");
            }
            context
        }
        None => None,
    };

    let token = if args.anonymous {
        None
    } else {
        ctx.tokens.bearer_token().await
    };

    let flow = SubmissionFlow::new(HttpAnalysisClient::with_client(
        ctx.http.clone(),
        &ctx.config.api,
    ));
    let result = flow
        .submit(Some(&captured.blob), context.as_ref(), token.as_deref())
        .await
        .map_err(|error| {
            let hint = if error.is_retryable() {
                "analysis failed; the service may be temporarily unavailable, try again"
            } else {
                "analysis failed"
            };
            anyhow::Error::new(error).context(hint)
        })?;

    match flags.format {
        OutputFormat::Raw => output(&result.raw, OutputFormat::Raw),
        OutputFormat::Text => {
            println!("{}", summarize(&result));
            Ok(())
        }
        OutputFormat::Json => output(
            &AnalyzeResponse {
                source: captured.source,
                file_name: &captured.blob.file_name,
                bytes: captured.blob.len(),
                context_attached: context.is_some(),
                authenticated: token.is_some(),
                assessment: &result.assessment,
            },
            OutputFormat::Json,
        ),
    }
}

fn select(path: &Path, config: &DermaConfig) -> anyhow::Result<CapturedImage> {
    let mut media =
        MediaAcquisitionController::new(NoCamera, config.upload.clone(), config.camera.clone());
    select_into(&mut media, path, config)
}

fn select_into<D: CameraDevice>(
    media: &mut MediaAcquisitionController<D>,
    path: &Path,
    config: &DermaConfig,
) -> anyhow::Result<CapturedImage> {
    let file = PickedFile::from_path(path, config.upload.max_bytes)
        .with_context(|| format!("cannot use {}", path.display()))?;
    media
        .select_file(file)
        .with_context(|| format!("cannot use {}", path.display()))?;
    Ok(media.handoff()?)
}

/// Capture through `camera`; a denied or missing device falls back to
/// `fallback` when one was given.
async fn capture_or_select<D: CameraDevice>(
    camera: D,
    fallback: Option<&Path>,
    config: &DermaConfig,
) -> anyhow::Result<CapturedImage> {
    let mut media =
        MediaAcquisitionController::new(camera, config.upload.clone(), config.camera.clone());

    match (media.start_camera().await, fallback) {
        (Ok(()), _) => {}
        (Err(MediaError::Device(error)), Some(path)) => {
            tracing::warn!(%error, path = %path.display(), "camera unavailable; using the file instead");
            return select_into(&mut media, path, config);
        }
        (Err(error), _) => return Err(anyhow::Error::new(error).context("camera unavailable")),
    }

    media.capture_photo().context("capture failed")?;
    Ok(media.handoff()?)
}

/// Human-readable rendering of an assessment.
fn summarize(result: &AnalysisResult) -> String {
    let assessment = &result.assessment;
    let mut out = String::new();

    let _ = writeln!(out, "Confidence: {:.0}%", assessment.confidence);
    if !assessment.conditions.is_empty() {
        let _ = writeln!(out, "Conditions: {}", assessment.conditions.join(", "));
    }
    if let Some(skin_type) = &assessment.skin_type {
        let _ = writeln!(out, "Skin type: {skin_type}");
    }
    if let Some(summary) = &assessment.summary {
        let _ = writeln!(out, "{summary}");
    }

    if !assessment.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations:");
        for rec in &assessment.recommendations {
            let _ = write!(out, "  - {}", rec.title);
            if !rec.target.is_empty() {
                let _ = write!(out, " ({})", rec.target);
            }
            let extras = [&rec.severity, &rec.detail, &rec.estimated_cost]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>();
            if !extras.is_empty() {
                let _ = write!(out, ": {}", extras.join(", "));
            }
            out.push('\n');
        }
    }

    if let Some(total) = &assessment.total_cost {
        let _ = writeln!(out, "Total estimated cost: {total}");
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use derma_analysis::{TransportResponse, classify};
    use derma_config::DermaConfig;
    use derma_core::ImageSource;
    use derma_media::{DeviceError, MediaError, NoCamera};
    use pretty_assertions::assert_eq;

    use super::{capture_or_select, summarize};

    #[tokio::test]
    async fn missing_camera_falls_back_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();

        let captured = capture_or_select(NoCamera, Some(&path), &DermaConfig::default())
            .await
            .unwrap();
        assert_eq!(captured.source, ImageSource::FileSelection);
        assert_eq!(captured.blob.file_name, "face.jpg");
        assert_eq!(captured.blob.len(), 6);
    }

    #[tokio::test]
    async fn missing_camera_without_a_file_is_an_error() {
        let err = capture_or_select(NoCamera, None, &DermaConfig::default())
            .await
            .unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<MediaError>(),
                Some(MediaError::Device(DeviceError::NotFound))
            ),
            "{err:#}"
        );
    }

    #[tokio::test]
    async fn replay_camera_is_preferred_over_the_file() {
        let camera = derma_media::ReplayCamera::from_image(image::RgbImage::new(16, 16));
        let captured = capture_or_select(
            camera,
            Some(std::path::Path::new("/nonexistent/face.jpg")),
            &DermaConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(captured.source, ImageSource::CameraCapture);
    }

    #[test]
    fn treatment_summary() {
        let result = classify(TransportResponse::new(
            200,
            r#"{
                "confidence": 87.4,
                "recommendations": [
                    {"treatment": "Botox", "area": "Forehead", "severity": "Mild",
                     "dosage": "10 units", "estimatedCost": "£200"}
                ],
                "totalCost": "£200"
            }"#,
        ))
        .unwrap();

        assert_eq!(
            summarize(&result),
            "Confidence: 87%\nRecommendations:\n  - Botox (Forehead): Mild, 10 units, £200\nTotal estimated cost: £200"
        );
    }

    #[test]
    fn skin_condition_summary_lists_conditions() {
        let result = classify(TransportResponse::new(
            200,
            r#"{
                "confidence": 71,
                "primaryCondition": "Acne",
                "secondaryConditions": ["Hyperpigmentation"],
                "skinType": "oily",
                "ingredientRecommendations": []
            }"#,
        ))
        .unwrap();

        let text = summarize(&result);
        assert!(text.starts_with("Confidence: 71%"), "{text}");
        assert!(text.contains("Conditions: Acne, Hyperpigmentation"), "{text}");
        assert!(text.contains("Skin type: oily"), "{text}");
    }
}
