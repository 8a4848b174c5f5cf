use crate::{AppState, Categories, CategoryLoad, Effect, Msg, PageApplied};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FiltersChanged(filter) => {
            if state.pages_mut().reset(filter) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::YearSelected(year) => {
            let filter = state.filter().with_year(year);
            if state.pages_mut().reset(filter) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CategoryToggled(id) => {
            // Ids outside a loaded vocabulary cannot come from a chip.
            let unknown = match state.category_load() {
                CategoryLoad::Loaded(categories) => !categories.contains(id),
                _ => false,
            };
            if unknown {
                return (state, Vec::new());
            }
            let filter = state.filter().toggle_category(id);
            if state.pages_mut().reset(filter) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LoadNextRequested => match state.pages_mut().begin_load() {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchPage(request)]
            }
            None => Vec::new(),
        },
        Msg::PageLoaded { request, result } => {
            match state.pages_mut().apply(&request, result) {
                PageApplied::Appended | PageApplied::Failed => state.mark_dirty(),
                PageApplied::Stale => {}
            }
            Vec::new()
        }
        Msg::CategoriesRequested => match state.category_load() {
            CategoryLoad::NotLoaded | CategoryLoad::Failed(_) => {
                state.set_category_load(CategoryLoad::Loading);
                state.mark_dirty();
                vec![Effect::FetchCategories]
            }
            CategoryLoad::Loading | CategoryLoad::Loaded(_) => Vec::new(),
        },
        Msg::CategoriesLoaded(result) => {
            if state.category_load() != &CategoryLoad::Loading {
                return (state, Vec::new());
            }
            let load = match result {
                Ok(categories) => CategoryLoad::Loaded(Categories::new(categories)),
                Err(err) => CategoryLoad::Failed(err),
            };
            state.set_category_load(load);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}
