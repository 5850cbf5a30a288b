//! Integration tests for `DieselAnnotationRepository` against PostgreSQL.

use depot::domain::ports::{AnnotationRepository, AnnotationRepositoryError};
use depot::domain::{AnnotationInput, BoxDraft, NewImage, ProjectName};
use depot::outbound::persistence::DieselAnnotationRepository;
use rstest::rstest;

mod support;

use support::{TestDatabase, fresh_database};

async fn repository() -> Option<(TestDatabase, DieselAnnotationRepository)> {
    let db = fresh_database().await?;
    let repo = DieselAnnotationRepository::new(db.pool().await);
    Some((db, repo))
}

fn project_name(raw: &str) -> ProjectName {
    ProjectName::new(raw).expect("valid project name")
}

fn new_image(project_id: i32, storage_name: &str) -> NewImage {
    NewImage {
        project_id,
        filename: "truck.jpg".to_owned(),
        mime_type: "image/jpeg".to_owned(),
        size: 3,
        storage_name: storage_name.to_owned(),
    }
}

fn draft(x: f64, class_name: &str) -> BoxDraft {
    BoxDraft::try_from(AnnotationInput {
        x,
        y: 0.2,
        w: 0.3,
        h: 0.4,
        class_name: class_name.to_owned(),
    })
    .expect("valid box")
}

#[rstest]
#[tokio::test]
async fn projects_round_trip_newest_first() {
    let Some((_db, repo)) = repository().await else {
        return;
    };

    let first = repo
        .insert_project(&project_name("Fleet A"))
        .await
        .expect("insert");
    let second = repo
        .insert_project(&project_name("Fleet B"))
        .await
        .expect("insert");

    let found = repo.find_project(first.id).await.expect("query");
    let listed = repo.list_projects().await.expect("query");

    assert_eq!(found, Some(first.clone()));
    assert_eq!(listed, vec![second, first]);
    assert!(repo.find_project(999).await.expect("query").is_none());
}

#[rstest]
#[tokio::test]
async fn images_require_an_existing_project() {
    let Some((_db, repo)) = repository().await else {
        return;
    };

    let result = repo.insert_image(&new_image(42, "orphan.jpg")).await;

    assert!(matches!(
        result,
        Err(AnnotationRepositoryError::MissingParent { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn storage_names_are_unique() {
    let Some((_db, repo)) = repository().await else {
        return;
    };
    let project = repo
        .insert_project(&project_name("Fleet A"))
        .await
        .expect("insert");

    repo.insert_image(&new_image(project.id, "same.jpg"))
        .await
        .expect("first insert");
    let second = repo.insert_image(&new_image(project.id, "same.jpg")).await;

    assert!(matches!(
        second,
        Err(AnnotationRepositoryError::Duplicate { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn deleting_a_project_cascades_and_reports_files() {
    let Some((_db, repo)) = repository().await else {
        return;
    };
    let project = repo
        .insert_project(&project_name("Fleet A"))
        .await
        .expect("insert");
    let image = repo
        .insert_image(&new_image(project.id, "a.jpg"))
        .await
        .expect("insert");
    repo.insert_image(&new_image(project.id, "b.jpg"))
        .await
        .expect("insert");
    repo.replace_annotations(image.id, &[draft(0.1, "truck")])
        .await
        .expect("replace");

    let mut removed = repo
        .delete_project(project.id)
        .await
        .expect("delete")
        .expect("project existed");
    removed.sort();

    assert_eq!(removed, ["a.jpg", "b.jpg"]);
    assert!(repo.find_image(image.id).await.expect("query").is_none());
    assert!(repo.list_annotations(image.id).await.expect("query").is_empty());
    assert_eq!(repo.delete_project(project.id).await.expect("delete"), None);
}

#[rstest]
#[tokio::test]
async fn replace_swaps_the_whole_set() {
    let Some((_db, repo)) = repository().await else {
        return;
    };
    let project = repo
        .insert_project(&project_name("Fleet A"))
        .await
        .expect("insert");
    let image = repo
        .insert_image(&new_image(project.id, "a.jpg"))
        .await
        .expect("insert");

    repo.replace_annotations(image.id, &[draft(0.1, "truck"), draft(0.5, "loader")])
        .await
        .expect("replace");
    let replaced = repo
        .replace_annotations(image.id, &[draft(0.7, "dozer")])
        .await
        .expect("replace");
    let listed = repo.list_annotations(image.id).await.expect("query");

    assert_eq!(listed, replaced);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].class_name, "dozer");
    assert!((listed[0].x - 0.7).abs() < f64::EPSILON);

    let cleared = repo.replace_annotations(image.id, &[]).await.expect("replace");
    assert!(cleared.is_empty());
    assert!(repo.list_annotations(image.id).await.expect("query").is_empty());
}

#[rstest]
#[tokio::test]
async fn append_keeps_existing_boxes() {
    let Some((_db, repo)) = repository().await else {
        return;
    };
    let project = repo
        .insert_project(&project_name("Fleet A"))
        .await
        .expect("insert");
    let image = repo
        .insert_image(&new_image(project.id, "a.jpg"))
        .await
        .expect("insert");
    repo.replace_annotations(image.id, &[draft(0.1, "truck")])
        .await
        .expect("replace");

    let appended = repo
        .append_annotations(image.id, &[draft(0.2, "ML_obj_3"), draft(0.3, "ML_obj_7")])
        .await
        .expect("append");
    let listed = repo.list_annotations(image.id).await.expect("query");

    assert_eq!(appended.len(), 2);
    let names: Vec<_> = listed.iter().map(|a| a.class_name.as_str()).collect();
    assert_eq!(names, ["truck", "ML_obj_3", "ML_obj_7"]);
}

#[rstest]
#[tokio::test]
async fn deletes_report_whether_a_row_existed() {
    let Some((_db, repo)) = repository().await else {
        return;
    };
    let project = repo
        .insert_project(&project_name("Fleet A"))
        .await
        .expect("insert");
    let image = repo
        .insert_image(&new_image(project.id, "a.jpg"))
        .await
        .expect("insert");
    let boxes = repo
        .replace_annotations(image.id, &[draft(0.1, "truck")])
        .await
        .expect("replace");

    assert!(repo.delete_annotation(boxes[0].id).await.expect("delete"));
    assert!(!repo.delete_annotation(boxes[0].id).await.expect("delete"));
    assert_eq!(
        repo.delete_image(image.id).await.expect("delete").as_deref(),
        Some("a.jpg")
    );
    assert_eq!(repo.delete_image(image.id).await.expect("delete"), None);
}

#[rstest]
#[tokio::test]
async fn boxes_for_missing_images_are_rejected() {
    let Some((_db, repo)) = repository().await else {
        return;
    };

    let result = repo.append_annotations(404, &[draft(0.1, "truck")]).await;

    assert!(matches!(
        result,
        Err(AnnotationRepositoryError::MissingParent { .. })
    ));
}
