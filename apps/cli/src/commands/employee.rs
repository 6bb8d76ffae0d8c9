//! Employee list and "add employee" form.

use tracing::{debug, info};

use nimbus_core::{Employee, NewEmployee};

use super::{search_filter, Context};
use crate::cli::{AddEmployeeArgs, EmployeeCommand};
use crate::error::AppError;
use crate::render;

pub async fn run(ctx: &Context, cmd: EmployeeCommand) -> Result<String, AppError> {
    match cmd {
        EmployeeCommand::List { search } => {
            let employees = list(ctx, search).await?;
            if ctx.is_json() {
                render::to_json(&employees)
            } else {
                Ok(render::employees(&employees))
            }
        }
        EmployeeCommand::Add(args) => {
            let employee = add(ctx, args).await?;
            if ctx.is_json() {
                render::to_json(&employee)
            } else {
                Ok(format!("Added employee {} ({})", employee.name, employee.emp_id))
            }
        }
    }
}

/// All employees ordered by name, filtered by name or employee number.
pub async fn list(ctx: &Context, search: Option<String>) -> Result<Vec<Employee>, AppError> {
    let query = search_filter(search)?;
    debug!(query = ?query, "list employees");

    let employees = ctx.db.employees().list().await?;
    Ok(match query {
        Some(q) => employees.into_iter().filter(|e| e.matches(&q)).collect(),
        None => employees,
    })
}

pub async fn add(ctx: &Context, args: AddEmployeeArgs) -> Result<Employee, AppError> {
    let employee = NewEmployee {
        emp_id: args.emp_id,
        name: args.name,
        national_id: args.national_id,
        hiring_date: args.hiring_date,
        address: args.address,
        phone_number: args.phone,
        photo_url: args.photo_url,
    }
    .validated()?;

    let created = ctx.db.employees().insert(&employee).await?;
    info!(id = %created.id, emp_id = %created.emp_id, "Employee added");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;

    fn args(emp_id: &str, name: &str) -> AddEmployeeArgs {
        AddEmployeeArgs {
            emp_id: emp_id.to_string(),
            name: name.to_string(),
            national_id: format!("NID-{}", emp_id),
            hiring_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            address: Some("  ".to_string()),
            phone: Some("+1 555 0100".to_string()),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let ctx = test_support::context().await;

        let created = add(&ctx, args("E-2", "Bilal Khan")).await.unwrap();
        assert_eq!(created.emp_id, "E-2");
        assert_eq!(created.address, None);
        add(&ctx, args("E-1", "Amina Yusuf")).await.unwrap();

        let all = list(&ctx, None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Amina Yusuf", "Bilal Khan"]);
    }

    #[tokio::test]
    async fn test_search_by_name_or_number() {
        let ctx = test_support::context().await;
        add(&ctx, args("E-001", "Amina Yusuf")).await.unwrap();
        add(&ctx, args("E-002", "Bilal Khan")).await.unwrap();

        let hits = list(&ctx, Some("KHAN".to_string())).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].emp_id, "E-002");

        let hits = list(&ctx, Some("e-00".to_string())).await.unwrap();
        assert_eq!(hits.len(), 2);

        assert!(list(&ctx, Some("nobody".to_string())).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_employee_number() {
        let ctx = test_support::context().await;
        add(&ctx, args("E-1", "Amina Yusuf")).await.unwrap();

        let err = add(&ctx, args("E-1", "Someone Else")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Employee number already exists");
    }

    #[tokio::test]
    async fn test_validation_runs_before_insert() {
        let ctx = test_support::context().await;
        let mut bad = args("E-1", "  ");
        bad.photo_url = Some("ftp://example.com/me.png".to_string());

        let err = add(&ctx, bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(ctx.db.employees().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_text_output() {
        let ctx = test_support::context().await;
        let out = run(&ctx, EmployeeCommand::Add(args("E-9", "Chen Wei"))).await.unwrap();
        assert_eq!(out, "Added employee Chen Wei (E-9)");

        let out = run(&ctx, EmployeeCommand::List { search: None }).await.unwrap();
        assert!(out.contains("Chen Wei"));
        assert!(out.contains("E-9"));
    }
}
