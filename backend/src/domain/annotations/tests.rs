//! Tests for annotation manager value types.

use rstest::rstest;

use super::*;

#[rstest]
#[case("Fleet A", "Fleet A")]
#[case("  Fleet A  ", "Fleet A")]
#[case("\tКарьер №2\n", "Карьер №2")]
fn project_names_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let name = ProjectName::new(raw).expect("valid name");
    assert_eq!(name.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
fn blank_project_names_are_rejected(#[case] raw: &str) {
    assert_eq!(ProjectName::new(raw), Err(ProjectNameError::Empty));
}

#[rstest]
fn project_name_limit_counts_characters() {
    let at_limit = "ж".repeat(ProjectName::MAX_CHARS);
    assert!(ProjectName::new(&at_limit).is_ok());

    let over = "ж".repeat(ProjectName::MAX_CHARS + 1);
    assert_eq!(
        ProjectName::new(&over),
        Err(ProjectNameError::TooLong {
            max: ProjectName::MAX_CHARS,
            actual: ProjectName::MAX_CHARS + 1,
        })
    );
}

#[rstest]
#[case(Some("image/png"), true)]
#[case(Some("image/svg+xml"), true)]
#[case(Some("text/plain"), false)]
#[case(Some("application/octet-stream"), false)]
#[case(None, false)]
fn uploads_must_declare_an_image_type(#[case] content_type: Option<&str>, #[case] ok: bool) {
    let upload = ImageUpload {
        filename: Some("f".to_owned()),
        content_type: content_type.map(str::to_owned),
        bytes: Vec::new(),
    };
    assert_eq!(upload.is_image(), ok);
}

#[rstest]
#[case(None, "image")]
#[case(Some(""), "image")]
#[case(Some("truck.jpg"), "truck.jpg")]
fn uploads_fall_back_to_a_default_filename(
    #[case] filename: Option<&str>,
    #[case] expected: &str,
) {
    let upload = ImageUpload {
        filename: filename.map(str::to_owned),
        content_type: Some("image/jpeg".to_owned()),
        bytes: Vec::new(),
    };
    assert_eq!(upload.display_filename(), expected);
}

#[rstest]
fn drafts_trim_class_names() {
    let draft = BoxDraft::try_from(AnnotationInput {
        x: 0.5,
        y: 0.5,
        w: 0.1,
        h: 0.1,
        class_name: " car ".to_owned(),
    })
    .expect("valid draft");
    assert_eq!(draft.class_name.as_ref(), "car");
}

#[rstest]
fn drafts_keep_out_of_range_coordinates() {
    let draft = BoxDraft::try_from(AnnotationInput {
        x: -0.2,
        y: 1.4,
        w: 2.0,
        h: 0.0,
        class_name: "car".to_owned(),
    })
    .expect("bounds are advisory");
    assert_eq!((draft.x, draft.y, draft.w, draft.h), (-0.2, 1.4, 2.0, 0.0));
}

#[rstest]
fn drafts_reject_blank_class_names() {
    let result = BoxDraft::try_from(AnnotationInput {
        x: 0.0,
        y: 0.0,
        w: 0.1,
        h: 0.1,
        class_name: "  ".to_owned(),
    });
    assert_eq!(result, Err(EmptyClassName));
}
