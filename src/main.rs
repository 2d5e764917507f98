mod background;
mod config;
mod constants;
mod ingest;
mod layout;
mod media;
mod store;
mod viewer;
mod worker;

use background::Petal;
use config::Config;
use constants::{
    ARROW_BUTTON_SIZE, COLOR_MEDIA_BACKDROP, COLOR_MEDIA_ERROR, COLOR_PLACEHOLDER,
    COLOR_POPUP_SCRIM, COLOR_POPUP_SCRIM_HEAVY, COLOR_PROGRESS_FILL, COLOR_PROGRESS_TRACK,
    COLOR_STRIP_RING, CONTAINER_FRACTION, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH,
    MAIN_MEDIA_FRACTION, MAX_BLOCKS, MAX_MEDIA_PER_BLOCK, MEDALLION_ENLARGED_SCALE,
    MEDALLION_FRACTION, MENU_AUTO_CLOSE_SECS, MENU_WIDTH, NUM_PETALS, PROGRESS_BAR_HEIGHT,
    SCROLL_TOP_THRESHOLD, STATUS_LINE_SECS, THUMBNAIL_FRACTION, THUMBNAIL_GAP_FRACTION,
};
use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, RichText, Sense, Vec2};
use media::{CollectionBlock, MediaItem, MediaKind};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use store::GalleryStore;
use viewer::ViewerState;
use worker::{HttpSink, MediaWorker, UploadTarget, WorkerEvent, WorkerRequest};

const MEDIA_FILE_FILTER: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "mp4", "m4v", "webm", "mov", "avi", "mkv",
];

const PORTFOLIO_LINKS: &[(&str, &str)] = &[
    ("Creative Market", "https://creativemarket.com/surreal66"),
    (
        "Adobe Stock",
        "https://stock.adobe.com/ua/contributor/207290474/surreal66",
    ),
    (
        "Shutterstock",
        "https://www.shutterstock.com/ru/g/katshko?rid=3789533",
    ),
    ("Behance", "https://www.behance.net/surreal66"),
];

const COMMISSION_LINKS: &[(&str, &str)] = &[
    (
        "Order on Upwork",
        "https://www.upwork.com/freelancers/~0126ac45fd71aca6fd",
    ),
    ("Dribbble", "https://dribbble.com/galunga_art"),
    (
        "Redbubble",
        "https://www.redbubble.com/people/galunga-art/shop",
    ),
];

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT])
            .with_title("Galunga Art"),
        ..Default::default()
    };

    eframe::run_native(
        "Artfolio",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ArtfolioApp::new(cc)))
        }),
    )
}

/// Deferred UI intent, collected while rendering borrows the store and
/// applied once per frame afterwards.
enum UiAction {
    OpenBlock(usize),
    ClosePopup,
    PrevMedia,
    NextMedia,
    Enlarge(usize),
    AddBlock,
    AddSlide(String),
    UploadSlide(String),
    UploadCover(String),
    AddYoutube { block_id: String, url: String },
    AddTag(String, usize, String),
    RemoveTag(String, usize, String),
    SetMetadata(String, usize, String, String),
    Save(String),
    OpenExternal(String),
    ScrollToTop,
}

/// One slide-out link menu. Links open in the system browser; `close` is
/// set when the user dismisses the menu explicitly.
fn menu_panel(
    ui: &mut egui::Ui,
    title: &str,
    links: &[(&str, &str)],
    actions: &mut Vec<UiAction>,
    close: &mut bool,
) {
    egui::Frame::popup(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(MENU_WIDTH);
            ui.horizontal(|ui| {
                ui.strong(title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        *close = true;
                    }
                });
            });
            ui.separator();
            for (label, url) in links {
                if ui.link(*label).clicked() {
                    actions.push(UiAction::OpenExternal((*url).to_string()));
                    *close = true;
                }
            }
        });
}

struct StatusLine {
    text: String,
    shown_at: Instant,
}

/// Lightweight per-frame view of one media item; avoids cloning data-URI
/// payloads during rendering.
struct MediaView {
    id: String,
    kind: MediaKind,
    /// Remote image to render through the http loader (thumbnail preferred).
    remote_uri: Option<String>,
    is_placeholder: bool,
    title: String,
    tags: Vec<String>,
    metadata: Vec<(String, String)>,
    /// Opened in the system browser when the item is activated enlarged.
    external_url: Option<String>,
}

impl MediaView {
    fn of(item: &MediaItem) -> Self {
        let remote_uri = match item.kind {
            // Posters stand in for the video itself.
            MediaKind::Video | MediaKind::Youtube => item
                .thumbnail
                .clone()
                .filter(|t| t.starts_with("http"))
                .or_else(|| Some(item.src.clone()).filter(|_| item.is_remote())),
            MediaKind::Image => Some(item.src.clone()).filter(|_| item.is_remote()),
        };
        Self {
            id: item.id.clone(),
            kind: item.kind,
            remote_uri,
            is_placeholder: item.is_placeholder(),
            title: item.title.clone(),
            tags: item.tags.clone(),
            metadata: item
                .metadata
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            external_url: (item.kind == MediaKind::Youtube).then(|| item.src.clone()),
        }
    }
}

struct ArtfolioApp {
    store: GalleryStore,
    viewer: ViewerState,
    worker: MediaWorker,
    config: Config,

    admin_mode: bool,
    show_passcode_dialog: bool,
    passcode_entry: String,
    show_youtube_dialog: bool,
    youtube_entry: String,
    tag_entry: String,
    metadata_key_entry: String,
    metadata_value_entry: String,

    /// Decoded uploads, keyed by media item id.
    textures: HashMap<String, egui::TextureHandle>,
    petals: Vec<Petal>,
    status: Option<StatusLine>,

    left_menu_open: bool,
    right_menu_open: bool,
    menu_deadline: Option<Instant>,
    logo_enlarged: bool,
    photo_enlarged: bool,

    scroll_offset: f32,
    scroll_range: f32,
    scroll_to_top: bool,
    started_at: Instant,
}

impl ArtfolioApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load();
        let store = GalleryStore::seeded(config.seed_blocks, config.seed_media_per_block);
        let worker = MediaWorker::spawn(
            Box::new(HttpSink::new(&config.api_base_url)),
            cc.egui_ctx.clone(),
        );

        Self {
            store,
            viewer: ViewerState::Closed,
            worker,
            config,
            admin_mode: false,
            show_passcode_dialog: false,
            passcode_entry: String::new(),
            show_youtube_dialog: false,
            youtube_entry: String::new(),
            tag_entry: String::new(),
            metadata_key_entry: String::new(),
            metadata_value_entry: String::new(),
            textures: HashMap::new(),
            petals: Petal::scatter(NUM_PETALS),
            status: None,
            left_menu_open: false,
            right_menu_open: false,
            menu_deadline: None,
            logo_enlarged: false,
            photo_enlarged: false,
            scroll_offset: 0.0,
            scroll_range: 0.0,
            scroll_to_top: false,
            started_at: Instant::now(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    fn open_block_media_len(&self) -> usize {
        self.viewer
            .open_block_index()
            .and_then(|i| self.store.blocks().get(i))
            .map(|b| b.media.len())
            .unwrap_or(0)
    }

    fn drain_worker_events(&mut self, ctx: &egui::Context) {
        for event in self.worker.poll_events() {
            match event {
                WorkerEvent::Ingested {
                    block_id,
                    target,
                    item,
                    preview,
                } => {
                    if let Some(image) = preview {
                        let texture = ctx.load_texture(
                            format!("media-{}", item.id),
                            image,
                            egui::TextureOptions::LINEAR,
                        );
                        self.textures.insert(item.id.clone(), texture);
                    }
                    let title = item.title.clone();
                    let result = match target {
                        UploadTarget::Cover => self.store.set_cover(&block_id, item),
                        UploadTarget::Slide => self.store.add_media(&block_id, item),
                    };
                    match result {
                        Ok(()) => self.set_status(format!("Added {title}")),
                        Err(rejection) => self.set_status(rejection.describe()),
                    }
                }
                WorkerEvent::IngestFailed { error, .. } => {
                    self.set_status(format!("Upload failed: {error}"));
                }
                WorkerEvent::Saved { block_id, result } => {
                    let success = result.is_ok();
                    self.store.apply_save_result(&block_id, success);
                    match result {
                        Ok(()) => self.set_status("Changes saved"),
                        Err(err) => self.set_status(format!("Save failed: {err}")),
                    }
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let admin_chord = egui::Modifiers::CTRL | egui::Modifiers::SHIFT;
        if ctx.input_mut(|i| i.consume_key(admin_chord, egui::Key::A)) {
            self.show_passcode_dialog = true;
            self.passcode_entry.clear();
        }

        if self.viewer != ViewerState::Closed {
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)) {
                self.viewer.close();
            }
            let len = self.open_block_media_len();
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowLeft)) {
                self.viewer.prev(len);
            }
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowRight)) {
                self.viewer.next(len);
            }
        }
    }

    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::OpenBlock(index) => self.viewer.open_block(index),
            UiAction::ClosePopup => self.viewer.close(),
            UiAction::PrevMedia => {
                let len = self.open_block_media_len();
                self.viewer.prev(len);
            }
            UiAction::NextMedia => {
                let len = self.open_block_media_len();
                self.viewer.next(len);
            }
            UiAction::Enlarge(index) => self.viewer.enlarge(index),
            UiAction::AddBlock => match self.store.add_block() {
                Ok(id) => self.set_status(format!("Added {id}")),
                Err(rejection) => self.set_status(rejection.describe()),
            },
            UiAction::AddSlide(block_id) => {
                if let Err(rejection) = self.store.add_slide(&block_id) {
                    self.set_status(rejection.describe());
                }
            }
            UiAction::UploadSlide(block_id) => self.pick_and_ingest(block_id, UploadTarget::Slide),
            UiAction::UploadCover(block_id) => self.pick_and_ingest(block_id, UploadTarget::Cover),
            UiAction::AddYoutube { block_id, url } => match media::extract_youtube_id(&url) {
                Some(video_id) => {
                    let item = MediaItem::youtube(video_id);
                    match self.store.add_media(&block_id, item) {
                        Ok(()) => self.set_status("Added YouTube video"),
                        Err(rejection) => self.set_status(rejection.describe()),
                    }
                }
                None => self.set_status("Not a recognizable YouTube URL"),
            },
            UiAction::AddTag(block_id, media_index, tag) => {
                if let Err(rejection) = self.store.add_tag(&block_id, media_index, &tag) {
                    self.set_status(rejection.describe());
                }
            }
            UiAction::RemoveTag(block_id, media_index, tag) => {
                if let Err(rejection) = self.store.remove_tag(&block_id, media_index, &tag) {
                    self.set_status(rejection.describe());
                }
            }
            UiAction::SetMetadata(block_id, media_index, key, value) => {
                if let Err(rejection) =
                    self.store.set_metadata(&block_id, media_index, &key, &value)
                {
                    self.set_status(rejection.describe());
                }
            }
            UiAction::Save(block_id) => {
                if let Some(block) = self.store.block(&block_id) {
                    self.worker.submit(WorkerRequest::SaveBlock {
                        block: block.clone(),
                    });
                    self.set_status(format!("Saving {}…", block.name));
                }
            }
            UiAction::OpenExternal(url) => {
                if let Err(err) = open::that(&url) {
                    log::error!("failed to open {url}: {err}");
                    self.set_status("Could not open the browser");
                }
            }
            UiAction::ScrollToTop => self.scroll_to_top = true,
        }
    }

    fn pick_and_ingest(&mut self, block_id: String, target: UploadTarget) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Media", MEDIA_FILE_FILTER)
            .pick_file()
        {
            self.worker.submit(WorkerRequest::IngestFile {
                block_id,
                target,
                path,
            });
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chrome: background, progress bar, header, menus, status line
    // ─────────────────────────────────────────────────────────────────────────

    fn paint_background(&self, ctx: &egui::Context) {
        let painter = ctx.layer_painter(egui::LayerId::background());
        let pointer = ctx.input(|i| i.pointer.hover_pos());
        background::paint(
            &painter,
            ctx.screen_rect(),
            pointer,
            self.started_at.elapsed().as_secs_f32(),
            &self.petals,
        );
    }

    fn paint_scroll_progress(&self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("scroll_progress"),
        ));
        let track = Rect::from_min_size(screen.min, vec2(screen.width(), PROGRESS_BAR_HEIGHT));
        painter.rect_filled(track, 0.0, COLOR_PROGRESS_TRACK);
        if self.scroll_range > 0.0 {
            let fraction = (self.scroll_offset / self.scroll_range).clamp(0.0, 1.0);
            let fill =
                Rect::from_min_size(screen.min, vec2(screen.width() * fraction, PROGRESS_BAR_HEIGHT));
            painter.rect_filled(fill, 0.0, COLOR_PROGRESS_FILL);
        }
    }

    fn header_ui(&mut self, ui: &mut egui::Ui) {
        let diameter = (ui.ctx().screen_rect().width() * MEDALLION_FRACTION).clamp(64.0, 140.0);
        ui.horizontal(|ui| {
            ui.add_space(16.0);
            ui.vertical(|ui| {
                if self.medallion(ui, "G", diameter, self.logo_enlarged) {
                    self.logo_enlarged = !self.logo_enlarged;
                }
                if ui.button("☰").clicked() {
                    self.left_menu_open = true;
                    self.touch_menu_timer();
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                ui.add_space(16.0);
                ui.vertical(|ui| {
                    if self.medallion(ui, "K", diameter, self.photo_enlarged) {
                        self.photo_enlarged = !self.photo_enlarged;
                    }
                    if ui.button("☰").clicked() {
                        self.right_menu_open = true;
                        self.touch_menu_timer();
                    }
                });
            });
        });
    }

    /// Painted circular stand-in for the logo/profile images. Returns true
    /// on click.
    fn medallion(&self, ui: &mut egui::Ui, letter: &str, diameter: f32, enlarged: bool) -> bool {
        let scale = if enlarged { MEDALLION_ENLARGED_SCALE } else { 1.0 };
        let size = diameter * scale;
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::click());
        let painter = ui.painter();
        painter.circle_filled(rect.center(), size / 2.0, Color32::from_rgb(249, 208, 229));
        painter.circle_stroke(
            rect.center(),
            size / 2.0,
            egui::Stroke::new(2.0, Color32::WHITE),
        );
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            letter,
            FontId::proportional(size * 0.4),
            Color32::from_rgb(131, 24, 67),
        );
        response.clicked()
    }

    fn touch_menu_timer(&mut self) {
        self.menu_deadline =
            Some(Instant::now() + Duration::from_secs_f32(MENU_AUTO_CLOSE_SECS));
    }

    fn menus_ui(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        if let Some(deadline) = self.menu_deadline {
            if Instant::now() > deadline {
                self.left_menu_open = false;
                self.right_menu_open = false;
                self.menu_deadline = None;
            }
        }

        let mut close_left = false;
        let mut close_right = false;
        let mut touched = false;

        if self.left_menu_open {
            let response = egui::Area::new(egui::Id::new("left_menu"))
                .anchor(Align2::LEFT_TOP, vec2(0.0, 0.0))
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    menu_panel(ui, "Portfolio", PORTFOLIO_LINKS, actions, &mut close_left)
                })
                .response;
            touched |= response.hovered() || response.contains_pointer();
        }

        if self.right_menu_open {
            let response = egui::Area::new(egui::Id::new("right_menu"))
                .anchor(Align2::RIGHT_TOP, vec2(0.0, 0.0))
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    menu_panel(ui, "Commissions", COMMISSION_LINKS, actions, &mut close_right)
                })
                .response;
            touched |= response.hovered() || response.contains_pointer();
        }

        // Pointer activity over a menu keeps it alive for another window.
        if touched {
            self.touch_menu_timer();
        }
        if close_left {
            self.left_menu_open = false;
        }
        if close_right {
            self.right_menu_open = false;
        }
    }

    fn footer_ui(&mut self, ctx: &egui::Context) {
        let expired = self
            .status
            .as_ref()
            .is_some_and(|s| s.shown_at.elapsed().as_secs_f32() > STATUS_LINE_SECS);
        if expired {
            self.status = None;
        }

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::none().inner_margin(6.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(status) = &self.status {
                        ui.label(RichText::new(&status.text).strong());
                    } else {
                        ui.weak("designed by whozhaysho");
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.admin_mode && ui.small_button("Exit admin mode").clicked() {
                            self.admin_mode = false;
                        }
                        if self.store.dirty_count() > 0 {
                            ui.weak(format!("{} unsaved", self.store.dirty_count()));
                        }
                    });
                });
            });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Gallery grid
    // ─────────────────────────────────────────────────────────────────────────

    fn gallery_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let viewport = ui.ctx().screen_rect().size();
        let grid = layout::grid_layout(viewport);

        let mut area = egui::ScrollArea::vertical()
            .id_salt("gallery")
            .max_height(viewport.y * CONTAINER_FRACTION)
            .auto_shrink([false, true]);
        if std::mem::take(&mut self.scroll_to_top) {
            area = area.vertical_scroll_offset(0.0);
        }

        let output = area.show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::splat(grid.gap);
            let blocks = self.store.blocks();
            for (row_index, row) in blocks.chunks(grid.columns).enumerate() {
                ui.horizontal(|ui| {
                    for (col_index, block) in row.iter().enumerate() {
                        let index = row_index * grid.columns + col_index;
                        self.block_tile(ui, index, block, grid.block_size, actions);
                    }
                });
            }
            if self.admin_mode && blocks.len() < MAX_BLOCKS && ui.button("Add More Blocks").clicked()
            {
                actions.push(UiAction::AddBlock);
            }
        });

        self.scroll_offset = output.state.offset.y;
        self.scroll_range = (output.content_size.y - output.inner_rect.height()).max(0.0);
    }

    fn block_tile(
        &self,
        ui: &mut egui::Ui,
        index: usize,
        block: &CollectionBlock,
        size: f32,
        actions: &mut Vec<UiAction>,
    ) {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::click());
        self.paint_media(ui, rect, &MediaView::of(&block.cover_media));

        if response.hovered() {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, egui::Rounding::same(6.0), Color32::from_black_alpha(96));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &block.name,
                FontId::proportional(20.0),
                Color32::WHITE,
            );
        }

        // Manual hit rects for the admin overlays, checked before the tile
        // itself claims the click.
        let camera_rect =
            Rect::from_center_size(rect.right_bottom() - vec2(20.0, 20.0), Vec2::splat(26.0));
        let save_rect =
            Rect::from_center_size(rect.right_top() + vec2(-20.0, 20.0), Vec2::splat(26.0));
        let dirty = self.store.is_dirty(&block.id);

        if self.admin_mode {
            let painter = ui.painter_at(rect.expand(4.0));
            painter.circle_filled(camera_rect.center(), 13.0, Color32::WHITE);
            painter.text(
                camera_rect.center(),
                Align2::CENTER_CENTER,
                "📷",
                FontId::proportional(14.0),
                Color32::BLACK,
            );
            if dirty {
                painter.circle_filled(save_rect.center(), 13.0, COLOR_STRIP_RING);
                painter.text(
                    save_rect.center(),
                    Align2::CENTER_CENTER,
                    "💾",
                    FontId::proportional(13.0),
                    Color32::WHITE,
                );
            }
        }

        if response.clicked() {
            let pointer = response.interact_pointer_pos();
            let over = |r: Rect| pointer.is_some_and(|p| r.contains(p));
            if self.admin_mode && over(camera_rect) {
                actions.push(UiAction::UploadCover(block.id.clone()));
            } else if self.admin_mode && dirty && over(save_rect) {
                actions.push(UiAction::Save(block.id.clone()));
            } else {
                actions.push(UiAction::OpenBlock(index));
            }
        }
    }

    fn scroll_top_button(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        if self.scroll_offset <= SCROLL_TOP_THRESHOLD {
            return;
        }
        egui::Area::new(egui::Id::new("scroll_top"))
            .anchor(Align2::RIGHT_BOTTOM, vec2(-24.0, -24.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui
                    .add(egui::Button::new(RichText::new("⬆").size(20.0)).rounding(18.0))
                    .clicked()
                {
                    actions.push(UiAction::ScrollToTop);
                }
            });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Popup viewer
    // ─────────────────────────────────────────────────────────────────────────

    fn popup_ui(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(block_index) = self.viewer.open_block_index() else {
            return;
        };
        let Some(block) = self.store.blocks().get(block_index) else {
            // The open index outlived the block list; drop back to the grid.
            self.viewer = ViewerState::Closed;
            return;
        };

        let screen = ctx.screen_rect();
        ctx.layer_painter(egui::LayerId::new(
            egui::Order::Middle,
            egui::Id::new("popup_scrim"),
        ))
        .rect_filled(screen, 0.0, COLOR_POPUP_SCRIM);

        let size = layout::popup_size(screen.size());
        let media_len = block.media.len();
        let block_id = block.id.clone();
        let dirty = self.store.is_dirty(&block_id);
        let media_index = self.viewer.media_index().unwrap_or(0).min(media_len.saturating_sub(1));
        let current = block.media.get(media_index).map(MediaView::of);
        let strip: Vec<(usize, MediaView)> = self
            .viewer
            .strip_indices(media_len)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&i| block.media.get(i).map(|m| (i, MediaView::of(m))))
                    .collect()
            })
            .unwrap_or_default();
        let enlarged = self
            .viewer
            .enlarged_index()
            .and_then(|i| block.media.get(i).map(MediaView::of));

        egui::Window::new("collection_popup")
            .title_bar(false)
            .resizable(false)
            .fixed_size(Vec2::splat(size))
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .frame(
                egui::Frame::window(&ctx.style())
                    .rounding(10.0)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                self.popup_contents(
                    ui,
                    size,
                    &block_id,
                    media_index,
                    media_len,
                    dirty,
                    current.as_ref(),
                    &strip,
                    actions,
                );
            });

        if let Some(view) = enlarged {
            self.enlarged_ui(ctx, size, &view, actions);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn popup_contents(
        &mut self,
        ui: &mut egui::Ui,
        size: f32,
        block_id: &str,
        media_index: usize,
        media_len: usize,
        dirty: bool,
        current: Option<&MediaView>,
        strip: &[(usize, MediaView)],
        actions: &mut Vec<UiAction>,
    ) {
        let origin = ui.min_rect().min;

        ui.vertical_centered(|ui| {
            let main_size = size * MAIN_MEDIA_FRACTION;
            let (rect, response) =
                ui.allocate_exact_size(Vec2::splat(main_size), Sense::click());
            if let Some(view) = current {
                self.paint_media(ui, rect, view);
                if response.clicked() {
                    actions.push(UiAction::Enlarge(media_index));
                }
            }

            ui.weak(format!("Slide {} of {}", media_index + 1, media_len.max(1)));

            let thumb = size * THUMBNAIL_FRACTION;
            ui.horizontal(|ui| {
                let strip_width =
                    thumb * strip.len() as f32 + thumb * THUMBNAIL_GAP_FRACTION * 2.0;
                ui.add_space((ui.available_width() - strip_width).max(0.0) / 2.0);
                ui.spacing_mut().item_spacing.x = thumb * THUMBNAIL_GAP_FRACTION;
                for (index, view) in strip {
                    let (rect, response) =
                        ui.allocate_exact_size(Vec2::splat(thumb), Sense::click());
                    self.paint_media(ui, rect, view);
                    if *index == media_index {
                        ui.painter().rect_stroke(
                            rect,
                            egui::Rounding::same(6.0),
                            egui::Stroke::new(2.0, COLOR_STRIP_RING),
                        );
                    }
                    if response.clicked() {
                        actions.push(UiAction::Enlarge(*index));
                    }
                }
            });

            if self.admin_mode {
                ui.separator();
                self.editing_panel(ui, block_id, media_index, media_len, dirty, current, actions);
            }
        });

        // Prev/next arrows and the close button float over the content.
        let arrow = Vec2::splat(ARROW_BUTTON_SIZE);
        let mid_y = origin.y + size * MAIN_MEDIA_FRACTION / 2.0;
        if ui
            .put(
                Rect::from_center_size(pos2(origin.x + arrow.x / 2.0, mid_y), arrow),
                egui::Button::new("◀").rounding(18.0),
            )
            .clicked()
        {
            actions.push(UiAction::PrevMedia);
        }
        if ui
            .put(
                Rect::from_center_size(pos2(origin.x + size - arrow.x * 1.5, mid_y), arrow),
                egui::Button::new("▶").rounding(18.0),
            )
            .clicked()
        {
            actions.push(UiAction::NextMedia);
        }
        if ui
            .put(
                Rect::from_center_size(pos2(origin.x + size - 30.0, origin.y + 6.0), Vec2::splat(22.0)),
                egui::Button::new("✕").frame(false),
            )
            .clicked()
        {
            actions.push(UiAction::ClosePopup);
        }
    }

    fn editing_panel(
        &mut self,
        ui: &mut egui::Ui,
        block_id: &str,
        media_index: usize,
        media_len: usize,
        dirty: bool,
        current: Option<&MediaView>,
        actions: &mut Vec<UiAction>,
    ) {
        if let Some(view) = current {
            ui.strong(format!("Editing Slide {}: {}", media_index + 1, view.title));
        }

        ui.horizontal(|ui| {
            if media_len < MAX_MEDIA_PER_BLOCK && ui.button("Add Slide").clicked() {
                actions.push(UiAction::AddSlide(block_id.to_string()));
            }
            if ui.button("Upload File").clicked() {
                actions.push(UiAction::UploadSlide(block_id.to_string()));
            }
            if ui.button("Add YouTube Video").clicked() {
                self.show_youtube_dialog = true;
                self.youtube_entry.clear();
            }
            if dirty && ui.button("Save Changes").clicked() {
                actions.push(UiAction::Save(block_id.to_string()));
            }
        });

        let Some(view) = current else {
            return;
        };

        ui.horizontal_wrapped(|ui| {
            ui.label("Tags:");
            for tag in &view.tags {
                if ui.small_button(format!("{tag} ✕")).clicked() {
                    actions.push(UiAction::RemoveTag(
                        block_id.to_string(),
                        media_index,
                        tag.clone(),
                    ));
                }
            }
        });
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.tag_entry)
                    .hint_text("Add a tag")
                    .desired_width(140.0),
            );
            let tag = self.tag_entry.trim();
            if ui.button("Add").clicked() && !tag.is_empty() {
                actions.push(UiAction::AddTag(
                    block_id.to_string(),
                    media_index,
                    tag.to_string(),
                ));
                self.tag_entry.clear();
            }
        });

        for (key, value) in &view.metadata {
            ui.horizontal(|ui| {
                ui.strong(format!("{key}:"));
                ui.label(value);
            });
        }
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.metadata_key_entry)
                    .hint_text("Key")
                    .desired_width(100.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.metadata_value_entry)
                    .hint_text("Value")
                    .desired_width(140.0),
            );
            let key = self.metadata_key_entry.trim();
            let value = self.metadata_value_entry.trim();
            if ui.button("Add").clicked() && !key.is_empty() && !value.is_empty() {
                actions.push(UiAction::SetMetadata(
                    block_id.to_string(),
                    media_index,
                    key.to_string(),
                    value.to_string(),
                ));
                self.metadata_key_entry.clear();
                self.metadata_value_entry.clear();
            }
        });
    }

    fn enlarged_ui(
        &self,
        ctx: &egui::Context,
        size: f32,
        view: &MediaView,
        actions: &mut Vec<UiAction>,
    ) {
        let screen = ctx.screen_rect();
        ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("enlarged_scrim"),
        ))
        .rect_filled(screen, 0.0, COLOR_POPUP_SCRIM_HEAVY);

        egui::Area::new(egui::Id::new("enlarged_media"))
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(Vec2::splat(size), Sense::click());
                self.paint_media(ui, rect, view);

                // YouTube items play in the system browser.
                if response.clicked() {
                    if let Some(url) = &view.external_url {
                        actions.push(UiAction::OpenExternal(url.clone()));
                    }
                }

                let arrow = Vec2::splat(ARROW_BUTTON_SIZE);
                if ui
                    .put(
                        Rect::from_center_size(
                            pos2(rect.left() + arrow.x / 2.0, rect.center().y),
                            arrow,
                        ),
                        egui::Button::new("◀").rounding(18.0),
                    )
                    .clicked()
                {
                    actions.push(UiAction::PrevMedia);
                }
                if ui
                    .put(
                        Rect::from_center_size(
                            pos2(rect.right() - arrow.x / 2.0, rect.center().y),
                            arrow,
                        ),
                        egui::Button::new("▶").rounding(18.0),
                    )
                    .clicked()
                {
                    actions.push(UiAction::NextMedia);
                }
                if ui
                    .put(
                        Rect::from_center_size(
                            pos2(rect.right() - 20.0, rect.top() + 20.0),
                            Vec2::splat(22.0),
                        ),
                        egui::Button::new("✕").rounding(11.0),
                    )
                    .clicked()
                {
                    actions.push(UiAction::ClosePopup);
                }
            });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Media rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Paints one media item into `rect`: cached texture, remote image,
    /// painted placeholder, or a visible failure indicator. Per-item only;
    /// siblings are unaffected by a failure.
    fn paint_media(&self, ui: &mut egui::Ui, rect: Rect, view: &MediaView) {
        let rounding = egui::Rounding::same(6.0);
        ui.painter().rect_filled(rect, rounding, COLOR_MEDIA_BACKDROP);

        if let Some(texture) = self.textures.get(&view.id) {
            let mut shape = egui::epaint::RectShape::filled(rect, rounding, Color32::WHITE);
            shape.fill_texture_id = texture.id();
            shape.uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            ui.painter().add(shape);
        } else if let Some(uri) = &view.remote_uri {
            egui::Image::from_uri(uri.clone())
                .rounding(rounding)
                .show_loading_spinner(true)
                .paint_at(ui, rect);
        } else if view.is_placeholder {
            ui.painter().rect_filled(rect, rounding, COLOR_PLACEHOLDER);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                &view.title,
                FontId::proportional((rect.width() * 0.08).clamp(9.0, 16.0)),
                Color32::from_gray(100),
            );
        } else {
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "⚠",
                FontId::proportional(rect.width() * 0.2),
                COLOR_MEDIA_ERROR,
            );
        }

        if matches!(view.kind, MediaKind::Video | MediaKind::Youtube) {
            ui.painter().circle_filled(
                rect.center(),
                rect.width() * 0.1,
                Color32::from_black_alpha(140),
            );
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "▶",
                FontId::proportional(rect.width() * 0.1),
                Color32::WHITE,
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────

    fn passcode_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_passcode_dialog {
            return;
        }
        let mut submitted = false;
        egui::Window::new("Admin access")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Enter the admin passcode");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.passcode_entry)
                        .password(true)
                        .desired_width(120.0),
                );
                submitted = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    submitted |= ui.button("Enter").clicked();
                    if ui.button("Cancel").clicked() {
                        self.show_passcode_dialog = false;
                    }
                });
            });

        if submitted {
            // Plain string comparison, a UI convenience rather than auth.
            if self.passcode_entry == self.config.admin_passcode {
                self.admin_mode = true;
                self.set_status("Admin mode enabled");
            } else {
                self.set_status("Wrong passcode");
            }
            self.passcode_entry.clear();
            self.show_passcode_dialog = false;
        }
    }

    fn youtube_dialog(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        if !self.show_youtube_dialog {
            return;
        }
        let Some(block_index) = self.viewer.open_block_index() else {
            self.show_youtube_dialog = false;
            return;
        };
        let Some(block_id) = self.store.blocks().get(block_index).map(|b| b.id.clone()) else {
            self.show_youtube_dialog = false;
            return;
        };

        egui::Window::new("Add YouTube Video")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.youtube_entry)
                        .hint_text("https://www.youtube.com/watch?v=…")
                        .desired_width(280.0),
                );
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() && !self.youtube_entry.trim().is_empty() {
                        actions.push(UiAction::AddYoutube {
                            block_id,
                            url: self.youtube_entry.trim().to_string(),
                        });
                        self.youtube_entry.clear();
                        self.show_youtube_dialog = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_youtube_dialog = false;
                    }
                });
            });
    }
}

impl eframe::App for ArtfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker_events(ctx);
        self.handle_shortcuts(ctx);
        self.paint_background(ctx);

        let mut actions: Vec<UiAction> = Vec::new();

        self.footer_ui(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(8.0))
            .show(ctx, |ui| {
                self.header_ui(ui);
                ui.add_space(8.0);
                ui.heading("Galunga Art");
                ui.label("digital art and designs");
                ui.add_space(8.0);
                self.gallery_ui(ui, &mut actions);
            });

        self.popup_ui(ctx, &mut actions);
        self.menus_ui(ctx, &mut actions);
        self.scroll_top_button(ctx, &mut actions);
        self.passcode_dialog(ctx);
        self.youtube_dialog(ctx, &mut actions);
        self.paint_scroll_progress(ctx);

        for action in actions {
            self.apply_action(action);
        }

        // The background wave never rests.
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}
