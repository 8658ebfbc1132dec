use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use rostersync_core::Person;

use crate::error::StorageError;
use crate::traits::{Liveness, PersonStore, UpsertOutcome};

pub struct SqlitePersonStore {
    conn: Connection,
    identity: String,
}

impl SqlitePersonStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn, identity: path.to_string() })
    }

    /// In-memory stores are all distinct databases, so each gets a fresh
    /// identity rather than sharing one lock key.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn, identity: format!("memory:{}", Uuid::now_v7()) })
    }

    /// The liveness marker for one row, if the row exists.
    pub fn liveness(&self, individual_id: i64) -> Result<Option<Liveness>, StorageError> {
        self.conn
            .query_row(
                "SELECT liveness FROM people WHERE individual_id = ?1",
                rusqlite::params![individual_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .map(|s| Liveness::parse(&s))
            .transpose()
    }
}

fn read_person(row: &rusqlite::Row) -> Result<Person, StorageError> {
    let birthday: Option<String> = row.get(2)?;
    let birthday = birthday
        .map(|s| {
            s.parse::<NaiveDate>()
                .map_err(|e| StorageError::Serialization(format!("invalid stored birthday {s:?}: {e}")))
        })
        .transpose()?;

    Ok(Person {
        individual_id: row.get(0)?,
        name: row.get(1)?,
        birthday,
        email: row.get(3)?,
        phone: row.get(4)?,
        age_group: row.get(5)?,
        gender: row.get(6)?,
    })
}

const PERSON_COLUMNS: &str = "individual_id, name, birthday, email, phone, age_group, gender";

impl PersonStore for SqlitePersonStore {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn stage_all(&mut self) -> Result<u64, StorageError> {
        let staged = self.conn.execute(
            "UPDATE people SET liveness = ?1 WHERE liveness = ?2",
            rusqlite::params![Liveness::Stale.as_str(), Liveness::Live.as_str()],
        )?;
        Ok(staged as u64)
    }

    fn lookup(&self, individual_id: i64) -> Result<Option<Person>, StorageError> {
        self.conn
            .query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people WHERE individual_id = ?1"),
                rusqlite::params![individual_id],
                |row| Ok(read_person(row)),
            )
            .optional()?
            .transpose()
    }

    fn upsert(&mut self, person: &Person) -> Result<UpsertOutcome, StorageError> {
        let birthday = person.birthday.map(|d| d.to_string());
        let updated = self.conn.execute(
            "UPDATE people
             SET name = ?2, birthday = ?3, email = ?4, phone = ?5,
                 age_group = ?6, gender = ?7, liveness = ?8
             WHERE individual_id = ?1",
            rusqlite::params![
                person.individual_id,
                person.name,
                birthday,
                person.email,
                person.phone,
                person.age_group,
                person.gender,
                Liveness::Live.as_str(),
            ],
        )?;
        if updated > 0 {
            return Ok(UpsertOutcome::Updated);
        }

        let result = self.conn.execute(
            "INSERT INTO people (individual_id, name, birthday, email, phone, age_group, gender, liveness)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                person.individual_id,
                person.name,
                birthday,
                person.email,
                person.phone,
                person.age_group,
                person.gender,
                Liveness::Live.as_str(),
            ],
        );
        match result {
            Ok(_) => Ok(UpsertOutcome::Inserted),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::ConstraintViolation(format!(
                    "individual_id {} rejected by schema",
                    person.individual_id
                )))
            }
            Err(e) => Err(StorageError::Sqlite(e)),
        }
    }

    fn sweep(&mut self) -> Result<Vec<Person>, StorageError> {
        // Read-then-delete in one transaction: the removed rows' last-known
        // values are part of the change report.
        let tx = self.conn.transaction()?;
        let removed = {
            let mut stmt = tx.prepare(&format!(
                "SELECT {PERSON_COLUMNS} FROM people WHERE liveness = ?1 ORDER BY individual_id"
            ))?;
            let rows: Vec<Person> = stmt
                .query_map(rusqlite::params![Liveness::Stale.as_str()], |row| {
                    Ok(read_person(row))
                })?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };
        tx.execute(
            "DELETE FROM people WHERE liveness = ?1",
            rusqlite::params![Liveness::Stale.as_str()],
        )?;
        tx.commit()?;
        Ok(removed)
    }

    fn list_all(&self) -> Result<Vec<Person>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PERSON_COLUMNS} FROM people ORDER BY individual_id"
        ))?;
        let rows = stmt
            .query_map([], |row| Ok(read_person(row)))?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
