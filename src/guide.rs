use crate::catalog::{self, Catalog, CatalogSources, LoadError, LoadOptions};
use crate::output::Snapshot;
use crate::search::{self, BossGroup};
use crate::state::{Defaults, Event, Rerender, Selection};
use crate::view::{self, ContentView};

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub sources: CatalogSources,
    pub load: LoadOptions,
    pub defaults: Defaults,
}

/// A loaded catalog together with the user's current selection.
#[derive(Clone, Debug)]
pub struct Guide {
    catalog: Catalog,
    selection: Selection,
}

impl Guide {
    pub fn new(catalog: Catalog, defaults: &Defaults) -> Self {
        let selection = Selection::initial(&catalog.bosses, defaults);
        Self { catalog, selection }
    }

    pub async fn load(options: &Options) -> Result<Self, LoadError> {
        let catalog = catalog::load(&options.sources, &options.load).await?;
        Ok(Self::new(catalog, &options.defaults))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn apply(&mut self, event: &Event) -> Rerender {
        let (next, rerender) = self.selection.apply(event, &self.catalog.bosses);
        self.selection = next;
        rerender
    }

    pub fn boss_list(&self) -> Vec<BossGroup> {
        search::filter(
            &self.selection.query,
            self.selection.language,
            &self.catalog,
        )
    }

    pub fn content(&self) -> Option<ContentView> {
        view::build_content(&self.catalog, &self.selection)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selection: self.selection.clone(),
            groups: self.boss_list(),
            content: self.content(),
        }
    }
}
