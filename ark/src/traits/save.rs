//! Serialize Arks into the DB, and get them back out.

use crate::types::*;
use serde::de::DeserializeOwned;
use std::io::{Error, ErrorKind, Result};

pub trait Save: serde::Serialize {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Store the JSON form of self, returning its address.
    fn save(&self, db: &DB) -> Result<Digest> {
        db.write_blob(self.to_json()?)
    }
}

impl Save for Ark<&str> {}
impl Save for Ark<String> {}
impl Save for Ark<Vec<u8>> {}
impl Save for Ark<Digest> {}

impl<C> Ark<C>
where
    C: DeserializeOwned,
{
    /// Retrieve an Ark previously stored with `save`.
    pub fn load(db: &DB, digest: &Digest) -> Result<Self> {
        let bytes = db.read_blob(digest).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::new(
                ErrorKind::NotFound,
                format!("No archive {} in {}", digest, db.as_ref().display()),
            ),
            _ => e,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn save_and_load() -> Result<()> {
        let db = DB::new_temp()?;
        let ark = Ark::from_entries([("/hello", Contents::File(Digest::from("world")))]);
        let digest = ark.save(&db)?;
        assert_eq!(digest, Digest::from(ark.to_json()?));
        assert_eq!(Ark::<Digest>::load(&db, &digest)?, ark);
        Ok(())
    }

    #[test]
    fn json_shape() -> Result<()> {
        let ark = Ark::from_entries([
            ("a", Contents::Dir),
            ("a/b.txt", Contents::File("hi")),
        ]);
        assert_eq!(ark.to_json()?, r#"[["a/b.txt","a"],[[],[]],["hi"]]"#);
        Ok(())
    }

    #[test]
    fn load_missing() -> Result<()> {
        let db = DB::new_temp()?;
        let err = Ark::<Digest>::load(&db, &Digest::from("nothing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }
}
