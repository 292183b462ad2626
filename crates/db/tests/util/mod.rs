//! Shared builders for repository integration tests.
#![allow(dead_code)]

use taskdesk_db::models::project::CreateProject;
use taskdesk_db::models::task::CreateTask;
use taskdesk_db::models::user::CreateUser;

pub fn new_user(username: &str, role: &str, section: Option<&str>) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        // Repository tests never log in; any opaque hash will do.
        password_hash: "$argon2id$test".to_string(),
        role: role.to_string(),
        section: section.map(str::to_string),
    }
}

pub fn new_task(title: &str, assigned_to: i64) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        description: String::new(),
        task_type: "Report".to_string(),
        level: "Normal".to_string(),
        assigned_to,
        leader_id: None,
        project_id: None,
        start_date: None,
        end_date: None,
        follow_up_date: None,
        follow_up_message: None,
    }
}

pub fn new_project(internal_number: &str, description: &str) -> CreateProject {
    CreateProject {
        internal_number: internal_number.to_string(),
        customer: None,
        request_number: None,
        notification_date: None,
        delivery_date: None,
        description: description.to_string(),
        weight_kg: None,
        expert: None,
        operator: None,
        warranty_pp: None,
        tech_office_status: None,
        purchasing_status: None,
        production_status: None,
        inspection_status: None,
        shipment_date: None,
        invoice_date: None,
        payment_amount: None,
        payment_date: None,
        status: "Active".to_string(),
        notes: None,
    }
}
