//! 用内存中的假存储模拟插入时的邀请码冲突和邀请码耗尽

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use classroom_core::config::JoinCodeConfig;
use classroom_core::errors::{ClassroomError, Result};
use classroom_core::models::{
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    enrollments::entities::Enrollment,
    materials::{entities::StudyMaterial, requests::CreateMaterialRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use classroom_core::services::EnrollmentService;
use classroom_core::storage::{Storage, StorageTx};

const TEACHER_ID: i64 = 1;

#[derive(Default)]
struct State {
    // 剩余需要模拟的插入冲突次数
    conflicts_remaining: u32,
    // 所有候选码都视为已占用
    codes_always_taken: bool,
    exists_calls: u32,
    insert_attempts: u32,
    commits: u32,
}

#[derive(Clone, Default)]
struct FakeStorage {
    state: Arc<Mutex<State>>,
}

struct FakeTx {
    state: Arc<Mutex<State>>,
}

fn teacher() -> User {
    User {
        id: TEACHER_ID,
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password_hash: String::new(),
        full_name: None,
        is_active: true,
        role: UserRole::Teacher,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn begin(&self) -> Result<Box<dyn StorageTx>> {
        Ok(Box::new(FakeTx {
            state: self.state.clone(),
        }))
    }

    async fn create_user(&self, _user: CreateUserRequest) -> Result<User> {
        unimplemented!()
    }

    async fn get_user_by_id(&self, _id: i64) -> Result<Option<User>> {
        unimplemented!()
    }

    async fn count_users(&self) -> Result<u64> {
        unimplemented!()
    }

    async fn get_class_by_id(&self, _class_id: i64) -> Result<Option<Class>> {
        unimplemented!()
    }

    async fn get_class_by_join_code(&self, _join_code: &str) -> Result<Option<Class>> {
        unimplemented!()
    }

    async fn list_teacher_classes(
        &self,
        _teacher_id: i64,
        _include_archived: bool,
    ) -> Result<Vec<Class>> {
        unimplemented!()
    }

    async fn list_student_classes(
        &self,
        _student_id: i64,
        _include_archived: bool,
    ) -> Result<Vec<Class>> {
        unimplemented!()
    }

    async fn count_classes(&self) -> Result<u64> {
        unimplemented!()
    }

    async fn get_enrollment(&self, _student_id: i64, _class_id: i64) -> Result<Option<Enrollment>> {
        unimplemented!()
    }

    async fn list_student_enrollments(&self, _student_id: i64) -> Result<Vec<Enrollment>> {
        unimplemented!()
    }

    async fn list_class_students(&self, _class_id: i64) -> Result<Vec<(Enrollment, User)>> {
        unimplemented!()
    }

    async fn count_class_students(&self, _class_id: i64) -> Result<i64> {
        unimplemented!()
    }

    async fn list_materials(&self, _class_id: i64) -> Result<Vec<StudyMaterial>> {
        unimplemented!()
    }
}

#[async_trait]
impl StorageTx for FakeTx {
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok((id == TEACHER_ID).then(teacher))
    }

    async fn get_class_by_id(&self, _class_id: i64) -> Result<Option<Class>> {
        unimplemented!()
    }

    async fn get_class_by_join_code(&self, _join_code: &str) -> Result<Option<Class>> {
        unimplemented!()
    }

    async fn join_code_exists(&self, _join_code: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.exists_calls += 1;
        Ok(state.codes_always_taken)
    }

    async fn find_class_by_teacher_and_name(
        &self,
        _teacher_id: i64,
        _name: &str,
        _exclude_class_id: Option<i64>,
    ) -> Result<Option<Class>> {
        Ok(None)
    }

    async fn insert_class(
        &self,
        teacher_id: i64,
        class: &CreateClassRequest,
        join_code: &str,
    ) -> Result<Class> {
        let mut state = self.state.lock().unwrap();
        state.insert_attempts += 1;
        if state.conflicts_remaining > 0 {
            state.conflicts_remaining -= 1;
            return Err(ClassroomError::store_conflict("join code taken"));
        }
        Ok(Class {
            id: 1,
            name: class.name.clone(),
            description: class.description.clone(),
            teacher_id,
            join_code: join_code.to_string(),
            is_archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn update_class(&self, _class_id: i64, _update: &UpdateClassRequest) -> Result<Class> {
        unimplemented!()
    }

    async fn delete_class(&self, _class_id: i64) -> Result<bool> {
        unimplemented!()
    }

    async fn get_enrollment(&self, _student_id: i64, _class_id: i64) -> Result<Option<Enrollment>> {
        unimplemented!()
    }

    async fn insert_enrollment(&self, _student_id: i64, _class_id: i64) -> Result<Enrollment> {
        unimplemented!()
    }

    async fn delete_enrollment(&self, _student_id: i64, _class_id: i64) -> Result<bool> {
        unimplemented!()
    }

    async fn insert_material(
        &self,
        _class_id: i64,
        _uploaded_by: i64,
        _material: &CreateMaterialRequest,
    ) -> Result<StudyMaterial> {
        unimplemented!()
    }

    async fn get_material_by_id(&self, _material_id: i64) -> Result<Option<StudyMaterial>> {
        unimplemented!()
    }

    async fn delete_material(&self, _material_id: i64) -> Result<bool> {
        unimplemented!()
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.state.lock().unwrap().commits += 1;
        Ok(())
    }
}

fn request() -> CreateClassRequest {
    CreateClassRequest {
        name: "Algebra I".to_string(),
        description: None,
    }
}

fn service(max_attempts: u32, max_conflict_retries: u32) -> EnrollmentService {
    EnrollmentService::new(JoinCodeConfig {
        max_attempts,
        max_conflict_retries,
    })
}

#[tokio::test]
async fn test_store_conflict_retried_with_fresh_code() {
    let storage = FakeStorage::default();
    storage.state.lock().unwrap().conflicts_remaining = 2;

    let class = service(100, 3)
        .create_class(&storage, TEACHER_ID, request())
        .await
        .unwrap();

    assert_eq!(class.name, "Algebra I");
    let state = storage.state.lock().unwrap();
    assert_eq!(state.insert_attempts, 3);
    assert_eq!(state.exists_calls, 3);
    assert_eq!(state.commits, 1);
}

#[tokio::test]
async fn test_store_conflict_surfaces_after_retries() {
    let storage = FakeStorage::default();
    storage.state.lock().unwrap().conflicts_remaining = 10;

    let result = service(100, 3)
        .create_class(&storage, TEACHER_ID, request())
        .await;

    assert!(matches!(result, Err(ClassroomError::StoreConflict(_))));
    let state = storage.state.lock().unwrap();
    assert_eq!(state.insert_attempts, 4);
    assert_eq!(state.commits, 0);
}

#[tokio::test]
async fn test_code_space_exhausted_stops_after_max_attempts() {
    let storage = FakeStorage::default();
    storage.state.lock().unwrap().codes_always_taken = true;

    let result = service(5, 3)
        .create_class(&storage, TEACHER_ID, request())
        .await;

    assert!(matches!(result, Err(ClassroomError::CodeSpaceExhausted(_))));
    let state = storage.state.lock().unwrap();
    assert_eq!(state.exists_calls, 5);
    assert_eq!(state.insert_attempts, 0);
}
