//=========================================================================
// Navigation Scenarios
//=========================================================================
//
// End-to-end flows through the public API: a host registers views,
// starts the navigator and drives it frame by frame.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use std::time::Duration;

use aetheric_navigation::prelude::*;

//=== Fixtures ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Screen {
    Lobby,
    Shop,
    Settings,
    Reward,
    Toast,
    Inventory,
}

impl ViewKind for Screen {
    fn is_multi_instance(&self) -> bool {
        matches!(self, Screen::Inventory)
    }
}

struct SettingsScreen;

impl KindOf<Screen> for SettingsScreen {
    const KIND: Screen = Screen::Settings;
}

const FADE: Duration = Duration::from_millis(200);
const FRAME: Duration = Duration::from_millis(50);

type Fading = Rc<RefCell<PresentedView<Screen, TimedPresenter>>>;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fading(kind: Screen) -> Fading {
    Rc::new(RefCell::new(PresentedView::new(kind, TimedPresenter::new(FADE))))
}

fn add(navigator: &mut Navigator<Screen>, view: &Fading) -> ViewHandle<Screen> {
    let handle = ViewHandle::from_shared(view);
    navigator.register_view(handle.clone()).unwrap();
    handle
}

fn run_frames(navigator: &mut Navigator<Screen>, frames: usize) {
    for _ in 0..frames {
        navigator.update(FRAME);
    }
}

fn frames_per_fade() -> usize {
    (FADE.as_millis() / FRAME.as_millis()) as usize
}

struct Lobby {
    navigator: Navigator<Screen>,
    lobby: Fading,
    shop: Fading,
    settings: Fading,
    reward: Fading,
    toast: Fading,
}

fn lobby() -> Lobby {
    init_logger();

    let mut navigator = NavigatorBuilder::new().with_start_view(Screen::Lobby).build();
    let lobby = fading(Screen::Lobby);
    let shop = fading(Screen::Shop);
    let settings = fading(Screen::Settings);
    let reward = fading(Screen::Reward);
    let toast = fading(Screen::Toast);

    for view in [&lobby, &shop, &settings, &reward, &toast] {
        add(&mut navigator, view);
    }
    navigator.start();

    Lobby {
        navigator,
        lobby,
        shop,
        settings,
        reward,
        toast,
    }
}

struct CountingWaker(AtomicUsize);

impl Wake for CountingWaker {
    fn wake(self: Arc<Self>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

//=== Scenarios ===========================================================

#[test]
fn fade_from_lobby_to_shop() {
    let Lobby {
        mut navigator,
        lobby,
        shop,
        ..
    } = lobby();

    let order = Rc::new(RefCell::new(Vec::new()));
    let hidden = Rc::clone(&order);
    let shown = Rc::clone(&order);

    navigator
        .show_view(
            ShowRequest::new(Screen::Shop)
                .with_data(250_u32)
                .on_active_hidden(move || hidden.borrow_mut().push("lobby hidden"))
                .on_shown(move || shown.borrow_mut().push("shop shown")),
        )
        .unwrap();

    run_frames(&mut navigator, frames_per_fade());
    assert!(!lobby.borrow().is_visible());
    assert_eq!(*order.borrow(), vec!["lobby hidden"]);
    assert!(shop.borrow().presenter().is_animating());

    run_frames(&mut navigator, frames_per_fade());
    assert!(shop.borrow().is_visible());
    assert_eq!(shop.borrow().view_data::<u32>(false), Some(&250));
    assert_eq!(*order.borrow(), vec!["lobby hidden", "shop shown"]);
    assert!(navigator.can_be_shown());
}

#[test]
fn popup_then_main_swap_leaves_nothing_visible_above() {
    let Lobby {
        mut navigator,
        shop,
        reward,
        toast,
        ..
    } = lobby();

    navigator.show_popup(Screen::Reward).unwrap();
    run_frames(&mut navigator, frames_per_fade());
    navigator
        .show_view(ShowRequest::new(Screen::Toast).on_layer(Layer::Custom4))
        .unwrap();
    run_frames(&mut navigator, frames_per_fade());
    assert!(reward.borrow().is_visible());
    assert!(toast.borrow().is_visible());

    navigator.show(Screen::Shop).unwrap();
    run_frames(&mut navigator, 2 * frames_per_fade());

    assert!(shop.borrow().is_visible());
    assert!(!reward.borrow().is_visible());
    assert!(!toast.borrow().is_visible());
    for layer in Layer::Main.above() {
        assert!(navigator.occupant(layer).is_none());
    }
}

#[test]
fn show_view_of_uses_the_type_tag() {
    let Lobby {
        mut navigator, settings, ..
    } = lobby();

    navigator.show_view_of::<SettingsScreen>().unwrap();
    run_frames(&mut navigator, 2 * frames_per_fade());

    assert!(settings.borrow().is_visible());
    assert_eq!(
        navigator.occupant(Layer::Main).map(|v| v.key()),
        Some(ViewKey::single(Screen::Settings))
    );
}

#[test]
fn gate_future_resolves_when_transition_ends() {
    let Lobby { mut navigator, .. } = lobby();

    navigator.show(Screen::Shop).unwrap();
    assert!(!navigator.can_be_shown());

    let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
    let waker = Waker::from(Arc::clone(&counter));
    let mut cx = Context::from_waker(&waker);
    let mut ready = navigator.wait_until_can_be_shown();

    assert_eq!(Pin::new(&mut ready).poll(&mut cx), Poll::Pending);

    run_frames(&mut navigator, 2 * frames_per_fade());

    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert_eq!(Pin::new(&mut ready).poll(&mut cx), Poll::Ready(()));
}

#[test]
fn deferred_actions_chain_navigation() {
    let Lobby {
        mut navigator,
        shop,
        settings,
        ..
    } = lobby();

    navigator.show(Screen::Shop).unwrap();
    navigator.execute_when_can_be_shown(|navigator| {
        navigator.show(Screen::Settings).unwrap();
    });

    run_frames(&mut navigator, 2 * frames_per_fade());
    assert_eq!(shop.borrow().phase(), Phase::Hiding);
    assert!(!navigator.can_be_shown());

    run_frames(&mut navigator, 2 * frames_per_fade());
    assert!(settings.borrow().is_visible());
    assert!(!shop.borrow().is_visible());
}

#[test]
fn view_requests_navigation_through_its_context() {
    let Lobby {
        mut navigator,
        lobby,
        shop,
        ..
    } = lobby();

    let context = lobby.borrow().context().cloned().unwrap();
    context.request(ShowRequest::new(Screen::Shop).instant());
    navigator.update(FRAME);
    assert!(shop.borrow().is_visible());

    context.go_back(Layer::Main);
    navigator.update(FRAME);
    run_frames(&mut navigator, 2 * frames_per_fade());
    assert!(lobby.borrow().is_visible());
    assert!(!shop.borrow().is_visible());
}

#[test]
fn multi_instance_views_are_addressed_by_id() {
    init_logger();
    let mut navigator = NavigatorBuilder::new().with_start_view(Screen::Lobby).build();
    add(&mut navigator, &fading(Screen::Lobby));

    let bags: Vec<_> = (1..=3)
        .map(|id| Rc::new(RefCell::new(PresentedView::with_instance(Screen::Inventory, id, InstantPresenter::new()))))
        .collect();
    for bag in &bags {
        navigator.register_view(ViewHandle::from_shared(bag)).unwrap();
    }
    navigator.start();

    let duplicate = ViewHandle::new(PresentedView::with_instance(Screen::Inventory, 2, InstantPresenter::new()));
    assert_eq!(
        navigator.register_view(duplicate),
        Err(NavigationError::DuplicateRegistration(ViewKey::instance(Screen::Inventory, 2)))
    );

    let errors = Rc::new(Cell::new(0));
    let counter = Rc::clone(&errors);
    let missing = navigator.show_view(
        ShowRequest::popup(Screen::Inventory)
            .instance(9)
            .on_error(move || counter.set(counter.get() + 1)),
    );
    assert!(missing.is_err());
    assert_eq!(errors.get(), 1);

    navigator
        .show_view(ShowRequest::popup(Screen::Inventory).instance(2).instant())
        .unwrap();

    assert!(bags[1].borrow().is_visible());
    assert!(!bags[0].borrow().is_visible());
    assert_eq!(
        navigator.occupant(Layer::Popups).map(|v| v.key()),
        Some(ViewKey::instance(Screen::Inventory, 2))
    );
    assert!(navigator.summary().contains("id: 2"));
}

#[test]
fn unregistering_requires_the_same_object() {
    let Lobby { mut navigator, shop, .. } = lobby();

    let impostor = ViewHandle::new(PresentedView::new(Screen::Shop, InstantPresenter::new()));
    assert_eq!(
        navigator.unregister_view(&impostor),
        Err(NavigationError::NotRegistered(ViewKey::single(Screen::Shop)))
    );
    assert!(navigator.get_view(Screen::Shop, None).is_some());

    let handle = navigator.get_view(Screen::Shop, None).unwrap();
    assert!(handle.ptr_eq(&ViewHandle::from_shared(&shop)));
    navigator.unregister_view(&handle).unwrap();
    assert!(navigator.get_view(Screen::Shop, None).is_none());
    assert!(navigator.show(Screen::Shop).is_err());
}

#[test]
fn host_sees_visibility_changes() {
    let Lobby { mut navigator, .. } = lobby();
    navigator.take_visibility_events();

    navigator.show_view(ShowRequest::new(Screen::Shop).instant()).unwrap();

    let events = navigator.take_visibility_events();
    assert_eq!(
        events,
        vec![
            VisibilityChanged {
                key: ViewKey::single(Screen::Lobby),
                visible: false
            },
            VisibilityChanged {
                key: ViewKey::single(Screen::Shop),
                visible: true
            },
        ]
    );
}

#[test]
fn interrupted_popup_stalls_until_recovered() {
    let Lobby {
        mut navigator,
        shop,
        reward,
        ..
    } = lobby();

    navigator.show_popup(Screen::Reward).unwrap();
    run_frames(&mut navigator, frames_per_fade());
    reward.borrow_mut().hide(None);

    navigator.show(Screen::Shop).unwrap();
    navigator.show(Screen::Settings).unwrap();
    assert!(navigator.is_stalled());
    assert_eq!(navigator.pending_requests(), 1);

    run_frames(&mut navigator, 2 * frames_per_fade());
    assert!(!shop.borrow().is_visible());

    assert_eq!(navigator.cancel_pending(), 1);
    navigator.recover_from_stall();
    assert!(navigator.can_be_shown());

    navigator.show(Screen::Shop).unwrap();
    run_frames(&mut navigator, 2 * frames_per_fade());
    assert!(shop.borrow().is_visible());
}
