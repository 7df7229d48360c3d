mod common;

use classroom_core::errors::ClassroomError;
use classroom_core::models::materials::requests::CreateMaterialRequest;
use classroom_core::services::materials::{add_material, delete_material, list_materials};
use common::{create_class, create_student, create_teacher, service, setup_storage};

fn material(title: &str) -> CreateMaterialRequest {
    CreateMaterialRequest {
        title: title.to_string(),
        description: Some("Chapter notes".to_string()),
        file_path: format!("/uploads/materials/{}.pdf", title.replace(' ', "_")),
        file_type: "pdf".to_string(),
        file_size: 2048,
    }
}

#[tokio::test]
async fn test_owner_adds_and_members_list_materials() {
    let storage = setup_storage().await;
    let teacher = create_teacher(&*storage, "alice").await;
    let student = create_student(&*storage, "sam").await;
    let class = create_class(&*storage, teacher.id, "Algebra I").await;

    service()
        .join_class(&*storage, student.id, &class.join_code)
        .await
        .unwrap();

    let first = add_material(&*storage, teacher.id, class.id, material("Week 1"))
        .await
        .unwrap();
    let second = add_material(&*storage, teacher.id, class.id, material("Week 2"))
        .await
        .unwrap();
    assert_eq!(first.uploaded_by, teacher.id);
    assert_eq!(first.file_size, 2048);

    let listed = list_materials(&*storage, student.id, class.id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let teacher_view = list_materials(&*storage, teacher.id, class.id).await.unwrap();
    assert_eq!(teacher_view.len(), 2);
}

#[tokio::test]
async fn test_only_owner_can_add_material() {
    let storage = setup_storage().await;
    let alice = create_teacher(&*storage, "alice").await;
    let bob = create_teacher(&*storage, "bob").await;
    let student = create_student(&*storage, "sam").await;
    let class = create_class(&*storage, alice.id, "Algebra I").await;

    let result = add_material(&*storage, bob.id, class.id, material("Week 1")).await;
    assert!(matches!(result, Err(ClassroomError::Forbidden(_))));

    let result = add_material(&*storage, student.id, class.id, material("Week 1")).await;
    assert!(matches!(result, Err(ClassroomError::Forbidden(_))));

    let result = add_material(&*storage, alice.id, 9999, material("Week 1")).await;
    assert!(matches!(result, Err(ClassroomError::NotFound(_))));
}

#[tokio::test]
async fn test_add_material_validation() {
    let storage = setup_storage().await;
    let teacher = create_teacher(&*storage, "alice").await;
    let class = create_class(&*storage, teacher.id, "Algebra I").await;

    let result = add_material(&*storage, teacher.id, class.id, material("  ")).await;
    assert!(matches!(result, Err(ClassroomError::Validation(_))));

    let mut negative = material("Week 1");
    negative.file_size = -1;
    let result = add_material(&*storage, teacher.id, class.id, negative).await;
    assert!(matches!(result, Err(ClassroomError::Validation(_))));
}

#[tokio::test]
async fn test_non_member_cannot_list_materials() {
    let storage = setup_storage().await;
    let teacher = create_teacher(&*storage, "alice").await;
    let outsider = create_student(&*storage, "olly").await;
    let class = create_class(&*storage, teacher.id, "Algebra I").await;

    let result = list_materials(&*storage, outsider.id, class.id).await;
    assert!(matches!(result, Err(ClassroomError::Forbidden(_))));
}

#[tokio::test]
async fn test_delete_material_returns_record() {
    let storage = setup_storage().await;
    let alice = create_teacher(&*storage, "alice").await;
    let bob = create_teacher(&*storage, "bob").await;
    let class = create_class(&*storage, alice.id, "Algebra I").await;

    let added = add_material(&*storage, alice.id, class.id, material("Week 1"))
        .await
        .unwrap();

    let result = delete_material(&*storage, bob.id, added.id).await;
    assert!(matches!(result, Err(ClassroomError::Forbidden(_))));

    let removed = delete_material(&*storage, alice.id, added.id).await.unwrap();
    assert_eq!(removed.file_path, added.file_path);
    assert!(storage.list_materials(class.id).await.unwrap().is_empty());

    let again = delete_material(&*storage, alice.id, added.id).await;
    assert!(matches!(again, Err(ClassroomError::NotFound(_))));
}

#[tokio::test]
async fn test_materials_deleted_with_class() {
    let storage = setup_storage().await;
    let teacher = create_teacher(&*storage, "alice").await;
    let class = create_class(&*storage, teacher.id, "Algebra I").await;

    add_material(&*storage, teacher.id, class.id, material("Week 1"))
        .await
        .unwrap();

    service()
        .delete_class(&*storage, teacher.id, class.id)
        .await
        .unwrap();

    assert!(storage.list_materials(class.id).await.unwrap().is_empty());
}
