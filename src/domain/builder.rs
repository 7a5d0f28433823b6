//! Mansion builder and the reference layout.

use tracing::debug;

use crate::domain::arena::Mansion;
use crate::domain::error::DomainResult;
use crate::domain::room::RoomId;

/// Assembles a mansion bottom-up: dead ends first, then the rooms leading to
/// them, finishing with the entrance.
#[derive(Debug, Default)]
pub struct MansionBuilder {
    mansion: Mansion,
}

impl MansionBuilder {
    pub fn new() -> Self {
        Self {
            mansion: Mansion::new(),
        }
    }

    /// Add a room without doors.
    pub fn dead_end(&mut self, name: &str) -> DomainResult<RoomId> {
        self.mansion.create_room(name, None, None)
    }

    /// Add a room whose doors lead to already added rooms.
    pub fn room(
        &mut self,
        name: &str,
        left: Option<RoomId>,
        right: Option<RoomId>,
    ) -> DomainResult<RoomId> {
        self.mansion.create_room(name, left, right)
    }

    /// Finish the layout with `entrance` as the root.
    pub fn build(mut self, entrance: RoomId) -> DomainResult<Mansion> {
        self.mansion.set_entrance(entrance)?;
        debug!(
            rooms = self.mansion.len(),
            depth = self.mansion.depth(),
            "mansion built"
        );
        Ok(self.mansion)
    }
}

/// The reference mansion.
///
/// ```text
/// Hall de Entrada
/// ├── [e] Sala de Jantar
/// │   └── [d] Quarto Mestre
/// │       ├── [e] Banheiro Norte
/// │       └── [d] Quarto de Vestir
/// └── [d] Sala de Música
///     └── [e] Biblioteca
///         ├── [e] Adega
///         └── [d] Jardim de Inverno
/// ```
pub fn reference_mansion() -> DomainResult<Mansion> {
    let mut b = MansionBuilder::new();

    let banheiro_norte = b.dead_end("Banheiro Norte")?;
    let quarto_vestir = b.dead_end("Quarto de Vestir")?;
    let adega = b.dead_end("Adega")?;
    let jardim_inverno = b.dead_end("Jardim de Inverno")?;

    let quarto_mestre = b.room("Quarto Mestre", Some(banheiro_norte), Some(quarto_vestir))?;
    let biblioteca = b.room("Biblioteca", Some(adega), Some(jardim_inverno))?;

    let sala_jantar = b.room("Sala de Jantar", None, Some(quarto_mestre))?;
    let sala_musica = b.room("Sala de Música", Some(biblioteca), None)?;

    let hall = b.room("Hall de Entrada", Some(sala_jantar), Some(sala_musica))?;

    b.build(hall)
}
