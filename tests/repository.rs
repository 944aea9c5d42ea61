use staff_registry::domain::company::{NewCompany, UpdateCompany};
use staff_registry::domain::employee::{NewEmployee, UpdateEmployee};
use staff_registry::domain::types::{
    Age, CompanyAddress, CompanyDescription, CompanyId, CompanyName, EmployeeEmail, EmployeeId,
    EmployeeName, JobTitle, PhoneNumber,
};
use staff_registry::repository::errors::RepositoryError;
use staff_registry::repository::{
    CompanyListQuery, CompanyReader, CompanySortField, CompanyWriter, DieselRepository,
    EmployeeListQuery, EmployeeReader, EmployeeSortField, EmployeeWriter, SortDirection,
};

mod common;

fn new_company(name: &str, description: Option<&str>) -> NewCompany {
    NewCompany::new(
        CompanyName::new(name).unwrap(),
        CompanyAddress::new(format!("{name} street 1")).unwrap(),
        PhoneNumber::new("06301234567").unwrap(),
        description.and_then(|d| CompanyDescription::parse(d).unwrap()),
    )
}

fn new_employee(name: &str, age: i64, title: JobTitle, company: CompanyId) -> NewEmployee {
    NewEmployee::new(
        EmployeeName::new(name).unwrap(),
        EmployeeEmail::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
        title,
        Age::new(age).unwrap(),
        company,
    )
}

/// Acme with two employees, Globex with one, Initech with none.
fn seed(repo: &DieselRepository) -> (CompanyId, CompanyId, CompanyId) {
    let acme = new_company("Acme", Some("Rockets and anvils"));
    let globex = new_company("Globex", None);
    let initech = new_company("Initech", Some("Software"));

    repo.create_company(
        &acme,
        &[
            new_employee("Wile", 40, JobTitle::Manager, acme.id),
            new_employee("Road", 22, JobTitle::Tester, acme.id),
        ],
    )
    .unwrap();
    repo.create_company(&globex, &[new_employee("Hank", 51, JobTitle::Developer, globex.id)])
        .unwrap();
    repo.create_company(&initech, &[]).unwrap();

    (acme.id, globex.id, initech.id)
}

#[test]
fn test_company_listing_filters_and_counts() {
    let test_db = common::TestDb::new("test_company_listing.db");
    let repo = test_db.repository();
    let (acme, _, initech) = seed(&repo);

    let (total, companies) = repo.list_companies(CompanyListQuery::new()).unwrap();
    assert_eq!(total, 3);
    let names: Vec<&str> = companies.iter().map(|c| c.company.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Globex", "Initech"]);
    assert_eq!(companies[0].company.id, acme);
    assert_eq!(companies[0].employee_count, 2);

    let (total, companies) = repo
        .list_companies(CompanyListQuery::new().employee_count(0))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(companies[0].company.id, initech);

    let (total, _) = repo
        .list_companies(CompanyListQuery::new().name("acm"))
        .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_company_search_and_ordering() {
    let test_db = common::TestDb::new("test_company_search.db");
    let repo = test_db.repository();
    seed(&repo);

    let (total, companies) = repo
        .list_companies(CompanyListQuery::new().search("ANVIL"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(companies[0].company.name.as_str(), "Acme");

    let (_, companies) = repo
        .list_companies(
            CompanyListQuery::new().order_by(CompanySortField::EmployeeCount, SortDirection::Desc),
        )
        .unwrap();
    let counts: Vec<usize> = companies.iter().map(|c| c.employee_count).collect();
    assert_eq!(counts, vec![2, 1, 0]);

    let (total, page) = repo
        .list_companies(CompanyListQuery::new().paginate(2, 2))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].company.name.as_str(), "Initech");
}

#[test]
fn test_company_delete_guard() {
    let test_db = common::TestDb::new("test_company_delete_guard.db");
    let repo = test_db.repository();
    let (acme, _, initech) = seed(&repo);

    match repo.delete_company(acme) {
        Err(RepositoryError::Conflict(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(repo.company_exists(acme).unwrap());
    let (total, _) = repo
        .list_employees(EmployeeListQuery::new().company_name("Acme"))
        .unwrap();
    assert_eq!(total, 2);

    repo.delete_company(initech).unwrap();
    assert!(!repo.company_exists(initech).unwrap());
    assert!(matches!(
        repo.delete_company(initech),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_company_partial_update() {
    let test_db = common::TestDb::new("test_company_update.db");
    let repo = test_db.repository();
    let (acme, _, _) = seed(&repo);

    let updates = UpdateCompany {
        name: Some(CompanyName::new("Acme Corp").unwrap()),
        description: Some(None),
        ..Default::default()
    };
    repo.update_company(acme, &updates).unwrap();

    let overview = repo.get_company_by_id(acme).unwrap().unwrap();
    assert_eq!(overview.company.name.as_str(), "Acme Corp");
    assert!(overview.company.description.is_none());
    assert_eq!(overview.company.address.as_str(), "Acme street 1");

    assert!(matches!(
        repo.update_company(CompanyId::generate(), &updates),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_employee_listing_joins_company() {
    let test_db = common::TestDb::new("test_employee_listing.db");
    let repo = test_db.repository();
    let (acme, globex, _) = seed(&repo);

    let (total, employees) = repo
        .list_employees(
            EmployeeListQuery::new().order_by(EmployeeSortField::Age, SortDirection::Desc),
        )
        .unwrap();
    assert_eq!(total, 3);
    let ages: Vec<i32> = employees.iter().map(|e| e.employee.age.get()).collect();
    assert_eq!(ages, vec![51, 40, 22]);
    assert_eq!(employees[0].company.id, globex);
    assert_eq!(employees[0].company.name.as_str(), "Globex");

    let (_, employees) = repo
        .list_employees(EmployeeListQuery::new().search("22"))
        .unwrap();
    assert!(employees.iter().any(|e| e.employee.name.as_str() == "Road"));

    let (total, _) = repo
        .list_employees(EmployeeListQuery::new().search("globex"))
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_employees(EmployeeListQuery::new().age(40).job_title("manag"))
        .unwrap();
    assert_eq!(total, 1);

    let summaries = repo.list_employee_summaries(&[acme, globex]).unwrap();
    let acme_names: Vec<&str> = summaries[&acme].iter().map(|s| s.name.as_str()).collect();
    assert_eq!(acme_names, vec!["Road", "Wile"]);
    assert_eq!(summaries[&globex].len(), 1);
}

#[test]
fn test_bulk_employee_writes_are_atomic() {
    let test_db = common::TestDb::new("test_bulk_atomic.db");
    let repo = test_db.repository();
    let (acme, _, _) = seed(&repo);

    // Second item reuses an existing email; the unique index rejects the batch.
    let batch = [
        new_employee("Fresh", 30, JobTitle::Designer, acme),
        new_employee("Wile", 30, JobTitle::Designer, acme),
    ];
    assert!(repo.create_employees(&batch).is_err());
    let (total, _) = repo.list_employees(EmployeeListQuery::new()).unwrap();
    assert_eq!(total, 3);

    let (_, employees) = repo
        .list_employees(EmployeeListQuery::new().name("Road"))
        .unwrap();
    let road = employees[0].employee.id;
    let updates = [
        (
            road,
            UpdateEmployee {
                age: Some(Age::new(23).unwrap()),
                ..Default::default()
            },
        ),
        (
            EmployeeId::generate(),
            UpdateEmployee {
                age: Some(Age::new(30).unwrap()),
                ..Default::default()
            },
        ),
    ];
    assert!(repo.update_employees(&updates).is_err());
    let road_now = repo.get_employee_by_id(road).unwrap().unwrap();
    assert_eq!(road_now.employee.age.get(), 22);
}

#[test]
fn test_delete_employees_reports_existing_ids() {
    let test_db = common::TestDb::new("test_delete_employees.db");
    let repo = test_db.repository();
    seed(&repo);

    let (_, employees) = repo.list_employees(EmployeeListQuery::new()).unwrap();
    let existing = employees[0].employee.id;
    let ghost = EmployeeId::generate();

    let deleted = repo.delete_employees(&[existing, ghost]).unwrap();
    assert_eq!(deleted, vec![existing]);
    assert!(repo.get_employee_by_id(existing).unwrap().is_none());

    let email = employees[1].employee.email.clone();
    assert_eq!(
        repo.find_email_owner(&email).unwrap(),
        Some(employees[1].employee.id)
    );
}

#[test]
fn test_employee_company_ordering_uses_company_id() {
    let test_db = common::TestDb::new("test_employee_company_ordering.db");
    let repo = test_db.repository();
    seed(&repo);

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let (_, employees) = repo
            .list_employees(EmployeeListQuery::new().order_by(EmployeeSortField::Company, direction))
            .unwrap();
        let keys: Vec<(String, String)> = employees
            .iter()
            .map(|e| (e.company.id.to_string(), e.employee.id.to_string()))
            .collect();

        let mut expected = keys.clone();
        expected.sort_by(|a, b| match direction {
            SortDirection::Asc => a.0.cmp(&b.0),
            SortDirection::Desc => b.0.cmp(&a.0),
        }
        .then_with(|| a.1.cmp(&b.1)));
        assert_eq!(keys, expected);
    }
}

#[test]
fn test_like_wildcards_match_literally() {
    let test_db = common::TestDb::new("test_like_wildcards.db");
    let repo = test_db.repository();
    seed(&repo);
    repo.create_company(&new_company("Half_Price", None), &[]).unwrap();

    let (total, _) = repo
        .list_companies(CompanyListQuery::new().search("%"))
        .unwrap();
    assert_eq!(total, 0);

    let (total, companies) = repo
        .list_companies(CompanyListQuery::new().name("_"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(companies[0].company.name.as_str(), "Half_Price");
}
