//! Acquisition through submission with a scripted service.

mod common;

use common::{ScriptedTransport, TREATMENT_BODY};
use derma_analysis::{SubmissionFlow, SubmissionStatus};
use derma_config::{CameraConfig, UploadConfig};
use derma_core::{AcquisitionPhase, AssessmentKind, ImageMime, ImageSource};
use derma_media::{CAPTURE_FILE_NAME, MediaAcquisitionController, PickedFile, ReplayCamera};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn selected_jpeg_is_analysed() {
    let camera = ReplayCamera::from_image(image::RgbImage::new(4, 4));
    let mut media =
        MediaAcquisitionController::new(camera, UploadConfig::default(), CameraConfig::default());

    let two_mb = vec![0x5A; 2 * 1024 * 1024];
    let preview_url = media
        .select_file(PickedFile::new("portrait.jpg", "image/jpeg", two_mb))
        .unwrap()
        .url()
        .to_string();
    assert!(preview_url.starts_with("file://"));
    assert_eq!(media.phase(), AcquisitionPhase::Previewing);

    let captured = media.handoff().unwrap();
    let flow = SubmissionFlow::new(ScriptedTransport::new().reply(200, TREATMENT_BODY));
    let result = flow.submit(Some(&captured.blob), None, None).await.unwrap();

    let expected: serde_json::Value = serde_json::from_str(TREATMENT_BODY).unwrap();
    assert_eq!(result.raw, expected);
    assert_eq!(result.assessment.kind, AssessmentKind::Treatment);
    match flow.status() {
        SubmissionStatus::Succeeded(stored) => assert_eq!(stored.raw, expected),
        other => panic!("expected success, got {other}"),
    }

    let seen = &flow.transport().seen()[0];
    assert_eq!(seen.bytes, 2 * 1024 * 1024);
    assert_eq!(seen.file_name, "portrait.jpg");
    assert!(seen.fields.is_empty());

    media.reset();
    assert_eq!(media.phase(), AcquisitionPhase::Idle);
}

#[tokio::test]
async fn camera_capture_is_analysed() {
    let camera = ReplayCamera::from_image(image::RgbImage::from_pixel(
        320,
        240,
        image::Rgb([200, 160, 140]),
    ));
    let mut media =
        MediaAcquisitionController::new(camera, UploadConfig::default(), CameraConfig::default());

    media.start_camera().await.unwrap();
    media.capture_photo().unwrap();
    assert!(!media.has_camera_session());

    let captured = media.handoff().unwrap();
    assert_eq!(captured.source, ImageSource::CameraCapture);

    let decoded = image::load_from_memory(&captured.blob.data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));

    let flow = SubmissionFlow::new(ScriptedTransport::new().reply(200, TREATMENT_BODY));
    flow.submit(Some(&captured.blob), None, Some("token"))
        .await
        .unwrap();

    let seen = &flow.transport().seen()[0];
    assert_eq!(seen.file_name, CAPTURE_FILE_NAME);
    assert_eq!(seen.mime, ImageMime::Jpeg);
}
